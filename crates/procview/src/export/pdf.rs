//! HTML to PDF conversion.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};

use crate::error::ReportError;

/// Page setup passed to `wkhtmltopdf`.
pub const WKHTMLTOPDF_OPTIONS: [&str; 14] = [
    "--page-size",
    "A4",
    "--margin-top",
    "0.35in",
    "--margin-right",
    "0.75in",
    "--margin-bottom",
    "0.75in",
    "--margin-left",
    "0.75in",
    "--encoding",
    "UTF-8",
    "--no-outline",
    "--enable-local-file-access",
];

/// Converts rendered HTML into PDF bytes.
pub trait PdfConverter {
    /// # Errors
    ///
    /// Returns [`ReportError::Pdf`] if the conversion fails.
    fn convert(&self, html: &str) -> Result<Vec<u8>, ReportError>;
}

/// [`PdfConverter`] backed by the `wkhtmltopdf` executable.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    program: PathBuf,
}

impl Wkhtmltopdf {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--quiet")
            .args(WKHTMLTOPDF_OPTIONS)
            .arg(input)
            .arg(output);
        command
    }
}

impl Default for Wkhtmltopdf {
    /// Looks the executable up on `PATH`.
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl PdfConverter for Wkhtmltopdf {
    fn convert(&self, html: &str) -> Result<Vec<u8>, ReportError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("report.html");
        let output = workdir.path().join("report.pdf");
        fs::write(&input, html)?;

        info!(program:? = self.program; "Converting report to PDF");
        let result = self.command(&input, &output).output().map_err(|err| {
            ReportError::Pdf(format!("failed to run {}: {err}", self.program.display()))
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ReportError::Pdf(format!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                stderr.trim()
            )));
        }

        let pdf = fs::read(&output)?;
        debug!(bytes = pdf.len(); "PDF converted");
        Ok(pdf)
    }
}
