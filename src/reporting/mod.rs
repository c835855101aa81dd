// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Report generation
//!
//! Renders a list of findings as plain text, JSON or a standalone HTML page
//! and writes them next to each other as `<base>.txt`, `<base>.json` and
//! `<base>.html`.

pub mod html;
pub mod json;
pub mod text;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::{Error, Result};
use crate::xss::{Finding, FindingType};

/// Timestamp format used in every report
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report title
pub const REPORT_TITLE: &str = "XSS Hunter - Vulnerability Report";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Html,
    /// Every format above
    All,
}

impl ReportFormat {
    /// Concrete formats this selection expands to
    pub fn expand(&self) -> &'static [ReportFormat] {
        match self {
            ReportFormat::Text => &[ReportFormat::Text],
            ReportFormat::Json => &[ReportFormat::Json],
            ReportFormat::Html => &[ReportFormat::Html],
            ReportFormat::All => &[ReportFormat::Text, ReportFormat::Json, ReportFormat::Html],
        }
    }

    /// File extension
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::All => "all",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "all" => Ok(ReportFormat::All),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Findings of one run plus the time the report was made
#[derive(Debug, Clone)]
pub struct Report {
    pub timestamp: DateTime<Local>,
    pub findings: Vec<Finding>,
}

impl Report {
    /// Create a report stamped with the current local time
    pub fn new(findings: Vec<Finding>) -> Self {
        Self {
            timestamp: Local::now(),
            findings,
        }
    }

    /// Override the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Formatted timestamp
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Number of findings
    pub fn total(&self) -> usize {
        self.findings.len()
    }

    /// Findings per type, in a fixed order, skipping types with none
    pub fn counts_by_type(&self) -> Vec<(FindingType, usize)> {
        [FindingType::Reflected, FindingType::Stored, FindingType::Dom]
            .into_iter()
            .map(|t| (t, self.findings.iter().filter(|f| f.finding_type == t).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// Render in a single concrete format
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(text::generate(self)),
            ReportFormat::Json => json::generate(self),
            ReportFormat::Html => Ok(html::generate(self)),
            ReportFormat::All => Err(Error::UnsupportedFormat(
                "'all' must be expanded before rendering".to_string(),
            )),
        }
    }

    /// Write `<base>.<ext>` for every selected format and return the paths
    pub fn write(&self, base: &str, format: ReportFormat) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for fmt in format.expand() {
            let path = PathBuf::from(format!("{}.{}", base, fmt.extension()));
            std::fs::write(&path, self.render(*fmt)?)?;
            info!("Report saved to {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::xss::{DomRule, HttpMethod};
    use chrono::TimeZone;

    pub(crate) fn sample_report() -> Report {
        let findings = vec![
            Finding::for_parameter(
                FindingType::Reflected,
                "http://a.test/search",
                "q",
                "<script>alert(1)</script>",
                HttpMethod::Get,
                "<p>**<script>alert(1)</script>**</p>".to_string(),
            )
            .with_encoded_payload("%3Cscript%3Ealert%281%29%3C/script%3E"),
            Finding::for_parameter(
                FindingType::Stored,
                "http://a.test/book",
                "comment",
                "<svg onload=alert(1)>",
                HttpMethod::Post,
                "<li>**<svg onload=alert(1)>**</li>".to_string(),
            ),
            Finding::dom_flow(
                "http://a.test/",
                &DomRule::new("location.hash", r"location\.hash").unwrap(),
                &DomRule::new("document.write(", r"document\.write\s*\(").unwrap(),
            ),
        ];
        let ts = Local.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        Report::new(findings).with_timestamp(ts)
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("TXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("all".parse::<ReportFormat>().unwrap().expand().len(), 3);
        assert!(matches!(
            "pdf".parse::<ReportFormat>(),
            Err(Error::UnsupportedFormat(f)) if f == "pdf"
        ));
    }

    #[test]
    fn test_counts_by_type() {
        let report = sample_report();
        assert_eq!(report.total(), 3);
        assert_eq!(
            report.counts_by_type(),
            vec![
                (FindingType::Reflected, 1),
                (FindingType::Stored, 1),
                (FindingType::Dom, 1)
            ]
        );
        assert_eq!(report.timestamp_str(), "2026-03-01 12:30:00");
    }

    #[test]
    fn test_write_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("scan");
        let base = base.to_str().unwrap();

        let paths = sample_report().write(base, ReportFormat::All).unwrap();

        assert_eq!(paths.len(), 3);
        for (path, ext) in paths.iter().zip(["txt", "json", "html"]) {
            assert_eq!(path.extension().unwrap(), ext);
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }
}
