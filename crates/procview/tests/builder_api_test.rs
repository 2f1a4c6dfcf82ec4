//! Integration tests for the ReportBuilder API

use std::{cell::RefCell, fs};

use procview::{
    ReportBuilder, ReportError,
    config::{AppConfig, ReportConfig, StyleConfig, TextConfig},
    export::pdf::PdfConverter,
};

const ORDER: &str = include_str!("fixtures/order.bpmn");

/// Records the HTML it receives and returns a stub document.
#[derive(Default)]
struct RecordingConverter {
    html: RefCell<Option<String>>,
}

impl PdfConverter for RecordingConverter {
    fn convert(&self, html: &str) -> Result<Vec<u8>, ReportError> {
        self.html.replace(Some(html.to_string()));
        Ok(b"%PDF-1.4 stub".to_vec())
    }
}

fn builder_in(dir: &std::path::Path) -> ReportBuilder {
    ReportBuilder::new(AppConfig::new(
        TextConfig::default(),
        ReportConfig::default().with_report_dir(dir),
        StyleConfig::default(),
    ))
}

#[test]
fn test_parse_fixture() {
    let builder = ReportBuilder::default();
    let graph = builder.parse(ORDER).expect("Failed to parse diagram");

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn test_parse_error_keeps_source() {
    let builder = ReportBuilder::default();
    let source = "<definitions><process id=\"P\">";

    match builder.parse(source) {
        Err(ReportError::Parse { src, .. }) => assert_eq!(src, source),
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_missing_file() {
    let result = ReportBuilder::default().parse_file("/nonexistent/order.bpmn");
    assert!(matches!(result, Err(ReportError::Io(_))));
}

#[test]
fn test_render_context() {
    let builder = ReportBuilder::default();
    let graph = builder.parse(ORDER).unwrap();

    let context = builder.render_context(&graph).unwrap();

    assert_eq!(context["model_title"], "Process_Order");
    assert_eq!(context["start_events"][0], "Order received");
    assert_eq!(context["end_events"][1], "Unnamed");
    assert_eq!(context["edges"][3]["start"], "Approved?");
    assert_eq!(context["edges"][3]["end"], "Unnamed");
    assert_eq!(context["edges"][3]["edge"], "no");
    assert!(!context.contains_key("encoded_image"));

    // Check order: flow links, then extras.
    let check = &context["nodes"][1];
    assert_eq!(check[0], "Check order");
    assert_eq!(check[1]["incoming"], "Flow_1");
    assert_eq!(check[1]["documentation"], "Verify stock and payment");
    assert!(check[1].get("x").is_none());
}

#[test]
fn test_context_without_process_fails() {
    let source = r#"<definitions><collaboration id="C"/></definitions>"#;
    let builder = ReportBuilder::default();
    let graph = builder.parse(source).unwrap();

    let err = builder.render_context(&graph).unwrap_err();
    assert_eq!(err.to_string(), "no process title available");
}

#[test]
fn test_render_svg() {
    let builder = ReportBuilder::default();
    let graph = builder.parse(ORDER).unwrap();

    let svg = builder.render_svg(&graph).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("data-marker=\"diamond\""));
    assert!(svg.contains("Order received"));
}

#[test]
fn test_render_svg_invalid_style() {
    let config = AppConfig::new(
        TextConfig::default(),
        ReportConfig::default(),
        StyleConfig::default().with_background_color("not-a-color"),
    );
    let builder = ReportBuilder::new(config);
    let graph = builder.parse(ORDER).unwrap();

    assert!(matches!(
        builder.render_svg(&graph),
        Err(ReportError::Export(_))
    ));
}

#[test]
fn test_render_html_embeds_image() {
    let builder = ReportBuilder::default();
    let graph = builder.parse(ORDER).unwrap();

    let html = builder.render_html(&graph).unwrap();
    let svg = builder.render_svg(&graph).unwrap();

    assert!(html.contains("Process_Order"));
    assert!(html.contains(&ReportBuilder::encode_image(svg.as_bytes())));
    assert!(html.contains("Verify stock and payment"));
}

#[test]
fn test_encode_image() {
    assert_eq!(ReportBuilder::encode_image(b"<svg/>"), "PHN2Zy8+");
}

#[test]
fn test_write_html_report() {
    let dir = tempfile::tempdir().unwrap();
    let reports = dir.path().join("reports");
    let builder = builder_in(&reports);
    let graph = builder.parse(ORDER).unwrap();

    let input = dir.path().join("order.bpmn");
    let path = builder.write_html_report(&graph, Some(&input)).unwrap();

    assert!(path.starts_with(&reports));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("report_") && name.ends_with("_order.html"));
    assert!(fs::read_to_string(&path).unwrap().contains("Process_Order"));

    let image = builder.paths(Some(&input)).image();
    assert!(fs::read_to_string(image).unwrap().starts_with("<svg"));
}

#[test]
fn test_write_pdf_report() {
    let dir = tempfile::tempdir().unwrap();
    let builder = builder_in(dir.path());
    let graph = builder.parse(ORDER).unwrap();
    let converter = RecordingConverter::default();

    let path = builder.write_pdf_report(&graph, None, &converter).unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4 stub");
    assert!(path.extension().is_some_and(|ext| ext == "pdf"));
    let html = converter.html.borrow();
    assert!(html.as_deref().unwrap().contains("Process_Order"));
}

#[test]
fn test_custom_template() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("report.hbs");
    fs::write(&template, "{{model_title}}|{{#each gates}}{{this}}{{/each}}").unwrap();

    let config = AppConfig::new(
        TextConfig::default(),
        ReportConfig::default().with_template(&template),
        StyleConfig::default(),
    );
    let builder = ReportBuilder::new(config);
    let graph = builder.parse(ORDER).unwrap();

    assert_eq!(builder.render_html(&graph).unwrap(), "Process_Order|Approved?");
}

#[test]
fn test_pdf_converter_from_config() {
    let builder = ReportBuilder::new(AppConfig::default().with_wkhtmltopdf("/opt/wkhtmltopdf"));
    assert_eq!(
        builder.pdf_converter().program(),
        std::path::Path::new("/opt/wkhtmltopdf")
    );
}
