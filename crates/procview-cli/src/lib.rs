//! CLI logic for the procview tool.
//!
//! This module contains the core CLI logic: load configuration, parse the
//! input diagram and write the requested view.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use procview::{ReportBuilder, ReportError, config::AppConfig};

/// Run the procview CLI application
///
/// Parses the input file and writes the view selected by `args.format`.
/// Text goes to stdout unless an output file is given; SVG, HTML and PDF
/// output default to the configured report directory.
///
/// # Errors
///
/// Returns `ReportError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Diagrams without a process (report formats)
/// - Template and PDF conversion errors
pub fn run(args: &Args) -> Result<(), ReportError> {
    info!(
        input_path = args.input,
        format:? = args.format;
        "Processing diagram"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    let builder = ReportBuilder::new(app_config);

    let input = Path::new(&args.input);
    let graph = builder.parse_file(input)?;
    let output = args.output.as_ref().map(PathBuf::from);

    match args.format {
        Format::Text => {
            let text = builder.render_text(&graph);
            match &output {
                Some(path) => fs::write(path, text)?,
                None => writeln!(io::stdout().lock(), "{text}")?,
            }
        }
        Format::Svg => {
            let svg = builder.render_svg(&graph)?;
            let path = match output {
                Some(path) => path,
                None => {
                    let paths = builder.paths(Some(input));
                    paths.ensure_dir()?;
                    paths.image()
                }
            };
            fs::write(&path, svg)?;
            info!(output_file:? = path; "SVG exported successfully");
        }
        Format::Html => {
            let path = match output {
                Some(path) => {
                    fs::write(&path, builder.render_html(&graph)?)?;
                    path
                }
                None => builder.write_html_report(&graph, Some(input))?,
            };
            info!(output_file:? = path; "HTML report exported successfully");
        }
        Format::Pdf => {
            let converter = builder.pdf_converter();
            let path = match output {
                Some(path) => {
                    fs::write(&path, builder.render_pdf(&graph, &converter)?)?;
                    path
                }
                None => builder.write_pdf_report(&graph, Some(input), &converter)?,
            };
            info!(output_file:? = path; "PDF report exported successfully");
        }
    }

    Ok(())
}

/// Applies command-line settings on top of the loaded configuration.
fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if args.details {
        config = config.with_node_details(true);
    }
    if let Some(dir) = &args.report_dir {
        config = config.with_report_dir(dir);
    }
    if let Some(program) = &args.wkhtmltopdf {
        config = config.with_wkhtmltopdf(program);
    }
    config
}
