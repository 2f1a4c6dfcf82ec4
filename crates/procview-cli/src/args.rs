//! Command-line argument definitions for the procview CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input diagram, the output view and
//! its destination, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output view produced by the CLI.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Plain-text summary
    #[default]
    Text,
    /// Figure as SVG
    Svg,
    /// HTML report with the embedded figure
    Html,
    /// PDF report, converted with wkhtmltopdf
    Pdf,
}

/// Command-line arguments for the procview tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input BPMN file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// View to produce
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Output file. Text goes to stdout and reports to the report directory
    /// when unset.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Include per-node attribute listings in the text view
    #[arg(long)]
    pub details: bool,

    /// Directory receiving generated reports
    #[arg(long)]
    pub report_dir: Option<String>,

    /// Path to the wkhtmltopdf executable
    #[arg(long)]
    pub wkhtmltopdf: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["procview", "order.bpmn"]).unwrap();

        assert_eq!(args.input, "order.bpmn");
        assert_eq!(args.format, Format::Text);
        assert!(args.output.is_none());
        assert!(!args.details);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_report_flags() {
        let args = Args::try_parse_from([
            "procview",
            "order.bpmn",
            "--format",
            "pdf",
            "--wkhtmltopdf",
            "/opt/wkhtmltopdf",
            "--report-dir",
            "out",
        ])
        .unwrap();

        assert_eq!(args.format, Format::Pdf);
        assert_eq!(args.wkhtmltopdf.as_deref(), Some("/opt/wkhtmltopdf"));
        assert_eq!(args.report_dir.as_deref(), Some("out"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["procview", "x.bpmn", "-f", "png"]).is_err());
    }
}
