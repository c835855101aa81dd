// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plain text report

use std::fmt::Write;

use super::{Report, REPORT_TITLE};

const MISSING: &str = "N/A";

/// Generate text report
pub fn generate(report: &Report) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", REPORT_TITLE);
    let _ = writeln!(out, "Generated: {}", report.timestamp_str());
    let _ = writeln!(out, "Total vulnerabilities found: {}", report.total());
    out.push('\n');

    for (i, finding) in report.findings.iter().enumerate() {
        let _ = writeln!(out, "Vulnerability #{}", i + 1);
        let _ = writeln!(out, "URL: {}", finding.url);
        let _ = writeln!(out, "Type: {}", finding.finding_type);
        let _ = writeln!(out, "Method: {}", finding.method);
        let _ = writeln!(
            out,
            "Parameter: {}",
            finding.parameter.as_deref().unwrap_or(MISSING)
        );
        let _ = writeln!(
            out,
            "Payload: {}",
            finding.payload.as_deref().unwrap_or(MISSING)
        );
        if let Some(ref encoded) = finding.encoded_payload {
            let _ = writeln!(out, "Encoded Payload: {}", encoded);
        }
        let _ = writeln!(out, "Evidence: {}", finding.evidence);
        out.push('\n');
    }

    out
}
