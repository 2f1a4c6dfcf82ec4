//! Output locations of generated reports.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};

/// Paths of the files produced for one report.
///
/// Every path shares the base `<report_dir>/report_<dd_mm_YYYY>`, followed by
/// `_<stem>` when the diagram came from a named file.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use procview::report::ReportPaths;
/// let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// let paths = ReportPaths::new("reports", Some("order"), date);
///
/// assert_eq!(paths.html().to_str(), Some("reports/report_07_03_2024_order.html"));
/// assert_eq!(paths.image().to_str(), Some("reports/report_07_03_2024_order_image.svg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    dir: PathBuf,
    base: String,
}

impl ReportPaths {
    pub fn new(dir: impl Into<PathBuf>, stem: Option<&str>, date: NaiveDate) -> Self {
        let mut base = format!("report_{}", date.format("%d_%m_%Y"));
        if let Some(stem) = stem.filter(|stem| !stem.is_empty()) {
            base.push('_');
            base.push_str(stem);
        }
        Self {
            dir: dir.into(),
            base,
        }
    }

    /// Paths for a report generated today from `input`, if known.
    pub fn for_today(dir: impl Into<PathBuf>, input: Option<&Path>) -> Self {
        let stem = input
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned());
        Self::new(dir, stem.as_deref(), Local::now().date_naive())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn html(&self) -> PathBuf {
        self.with_suffix(".html")
    }

    pub fn pdf(&self) -> PathBuf {
        self.with_suffix(".pdf")
    }

    pub fn image(&self) -> PathBuf {
        self.with_suffix("_image.svg")
    }

    /// Creates the report directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while creating the directory.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}{suffix}", self.base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 28).unwrap()
    }

    #[test]
    fn test_paths_with_stem() {
        let paths = ReportPaths::new("out", Some("claims"), date());

        assert_eq!(paths.html(), Path::new("out/report_28_11_2023_claims.html"));
        assert_eq!(paths.pdf(), Path::new("out/report_28_11_2023_claims.pdf"));
        assert_eq!(
            paths.image(),
            Path::new("out/report_28_11_2023_claims_image.svg")
        );
    }

    #[test]
    fn test_paths_without_stem() {
        let paths = ReportPaths::new("out", None, date());
        assert_eq!(paths.html(), Path::new("out/report_28_11_2023.html"));

        let empty = ReportPaths::new("out", Some(""), date());
        assert_eq!(empty, paths);
    }

    #[test]
    fn test_stem_from_input_path() {
        let paths = ReportPaths::for_today("out", Some(Path::new("/data/order.bpmn")));
        let html = paths.html();
        let name = html.file_name().unwrap().to_string_lossy();

        assert!(name.starts_with("report_"));
        assert!(name.ends_with("_order.html"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let root = tempfile::tempdir().unwrap();
        let paths = ReportPaths::new(root.path().join("a/b"), None, date());

        paths.ensure_dir().unwrap();
        assert!(root.path().join("a/b").is_dir());
        // Idempotent.
        paths.ensure_dir().unwrap();
    }
}
