use std::{fs, path::PathBuf};

use tempfile::tempdir;

use procview::ReportError;
use procview_cli::{Args, Format, run};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .bpmn files from a directory
fn collect_bpmn_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("bpmn")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &std::path::Path, format: Format, output: Option<PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        format,
        output: output.map(|path| path.to_string_lossy().to_string()),
        config: None,
        details: false,
        report_dir: None,
        wkhtmltopdf: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_diagrams() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let diagrams = collect_bpmn_files(fixtures());

    assert!(!diagrams.is_empty(), "No diagrams found in tests/fixtures/");

    let mut failed = Vec::new();

    for diagram in &diagrams {
        let stem = diagram.file_stem().unwrap().to_string_lossy().to_string();

        for (format, extension) in [
            (Format::Text, "txt"),
            (Format::Svg, "svg"),
            (Format::Html, "html"),
        ] {
            let output = temp_dir.path().join(format!("{stem}.{extension}"));
            if let Err(e) = run(&args(diagram, format, Some(output.clone()))) {
                failed.push((diagram.clone(), format, e));
                continue;
            }
            assert!(output.is_file(), "{} was not written", output.display());
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid diagrams that failed:");
        for (path, format, err) in &failed {
            eprintln!("  - {} ({format:?}): {}", path.display(), err);
        }
        panic!("{} valid diagram run(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_diagrams() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let diagrams = collect_bpmn_files(fixtures().join("errors"));

    assert!(
        !diagrams.is_empty(),
        "No error diagrams found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for diagram in &diagrams {
        let output = temp_dir.path().join("error.txt");
        match run(&args(diagram, Format::Text, Some(output))) {
            Err(ReportError::Parse { .. }) => {}
            Err(other) => panic!("{}: expected a parse error, got {other}", diagram.display()),
            Ok(()) => unexpectedly_succeeded.push(diagram.clone()),
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error diagrams parsed without errors: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_text_output_file() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("loan.txt");

    let mut loan = args(&fixtures().join("loan.bpmn"), Format::Text, Some(output.clone()));
    loan.details = true;
    run(&loan).unwrap();

    let text = fs::read_to_string(output).unwrap();
    assert!(text.starts_with("Components of the BPMN diagram:\nstartEvent:\n   0. Application received\n"));
    assert!(text.contains("parallelGateway:\n   0. Unnamed\n   1. Unnamed"));
    assert!(text.contains("subProcess:\n   0. Decide"));
    assert!(text.contains("\nNodes:\n"));
    assert!(text.contains("Node name: Too slow"));
}

#[test]
fn e2e_reports_into_report_dir() {
    let temp_dir = tempdir().unwrap();
    let reports = temp_dir.path().join("reports");

    let mut html = args(&fixtures().join("order.bpmn"), Format::Html, None);
    html.report_dir = Some(reports.to_string_lossy().to_string());
    run(&html).unwrap();

    let mut svg = args(&fixtures().join("order.bpmn"), Format::Svg, None);
    svg.report_dir = html.report_dir.clone();
    run(&svg).unwrap();

    let mut names: Vec<String> = fs::read_dir(&reports)
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    assert_eq!(names.len(), 2, "unexpected files: {names:?}");
    assert!(names[0].starts_with("report_") && names[0].ends_with("_order.html"));
    assert!(names[1].ends_with("_order_image.svg"));
}

#[test]
fn e2e_pdf_without_converter_fails() {
    let temp_dir = tempdir().unwrap();

    let mut pdf = args(
        &fixtures().join("order.bpmn"),
        Format::Pdf,
        Some(temp_dir.path().join("order.pdf")),
    );
    pdf.wkhtmltopdf = Some("/nonexistent/procview/wkhtmltopdf".to_string());

    assert!(matches!(run(&pdf), Err(ReportError::Pdf(_))));
}

#[test]
fn e2e_missing_config_file() {
    let mut missing = args(&fixtures().join("order.bpmn"), Format::Text, None);
    missing.config = Some("/nonexistent/procview/config.toml".to_string());

    assert!(matches!(run(&missing), Err(ReportError::Config(_))));
}
