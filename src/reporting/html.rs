// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML report
//!
//! A single self-contained page. Every value taken from a finding is escaped;
//! the payload inside the evidence snippet is highlighted after escaping.

use super::{Report, REPORT_TITLE};
use crate::xss::encoding::html_escape;
use crate::xss::Finding;

/// Generate HTML report
pub fn generate(report: &Report) -> String {
    let mut html = String::new();

    html.push_str(&generate_header());
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&generate_banner(report));
    html.push_str(&generate_summary(report));

    html.push_str("<h2>Vulnerabilities</h2>\n");
    if report.findings.is_empty() {
        html.push_str("<p class=\"empty\">No vulnerabilities found.</p>\n");
    }
    for (i, finding) in report.findings.iter().enumerate() {
        html.push_str(&generate_finding(i + 1, finding));
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn generate_header() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; margin: 0; padding: 20px; color: #333; }}
        h1, h2, h3 {{ color: #2c3e50; }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        .header {{ background-color: #3498db; color: white; padding: 20px; margin-bottom: 20px; border-radius: 5px; }}
        .header h1 {{ color: white; margin: 0; }}
        .summary table {{ border-collapse: collapse; }}
        .summary td {{ padding: 4px 12px; border-bottom: 1px solid #ddd; }}
        .vulnerability {{ background-color: #f9f9f9; border-left: 4px solid #e74c3c; padding: 15px; margin-bottom: 20px; border-radius: 0 5px 5px 0; }}
        .vulnerability h3 {{ margin-top: 0; color: #e74c3c; }}
        .details {{ display: grid; grid-template-columns: 150px auto; gap: 6px; }}
        .label {{ font-weight: bold; }}
        .evidence {{ font-family: monospace; white-space: pre-wrap; word-break: break-all; background: #fff; padding: 8px; }}
        .highlight {{ background-color: #ffeb3b; font-weight: bold; }}
    </style>
</head>
"#,
        title = REPORT_TITLE
    )
}

fn generate_banner(report: &Report) -> String {
    format!(
        "<div class=\"header\">\n<h1>{}</h1>\n<p>Generated: {}</p>\n</div>\n",
        REPORT_TITLE,
        html_escape(&report.timestamp_str())
    )
}

fn generate_summary(report: &Report) -> String {
    let mut html = String::from("<div class=\"summary\">\n<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p>Total vulnerabilities found: {}</p>\n",
        report.total()
    ));

    let counts = report.counts_by_type();
    if !counts.is_empty() {
        html.push_str("<table>\n");
        for (finding_type, count) in counts {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                finding_type.label(),
                count
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("</div>\n");
    html
}

fn generate_finding(index: usize, finding: &Finding) -> String {
    let mut rows = vec![
        ("URL", html_escape(&finding.url)),
        ("Type", finding.finding_type.label().to_string()),
        ("Method", finding.method.to_string()),
        ("Parameter", escape_or_missing(finding.parameter.as_deref())),
        ("Payload", escape_or_missing(finding.payload.as_deref())),
    ];
    if let Some(ref encoded) = finding.encoded_payload {
        rows.push(("Encoded Payload", html_escape(encoded)));
    }
    if let Some(ref source) = finding.source {
        rows.push(("Source", html_escape(source)));
    }
    if let Some(ref sink) = finding.sink {
        rows.push(("Sink", html_escape(sink)));
    }

    let mut html = format!(
        "<div class=\"vulnerability\">\n<h3>Vulnerability #{}</h3>\n<div class=\"details\">\n",
        index
    );
    for (label, value) in rows {
        html.push_str(&format!(
            "<div class=\"label\">{}:</div>\n<div>{}</div>\n",
            label, value
        ));
    }
    html.push_str(&format!(
        "<div class=\"label\">Evidence:</div>\n<div class=\"evidence\">{}</div>\n",
        highlight_evidence(&finding.evidence)
    ));
    html.push_str("</div>\n</div>\n");
    html
}

fn escape_or_missing(value: Option<&str>) -> String {
    value.map(html_escape).unwrap_or_else(|| "N/A".to_string())
}

/// Escape the snippet and turn each `**payload**` marker into a highlight span
fn highlight_evidence(evidence: &str) -> String {
    let escaped = html_escape(evidence);
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        match after.find("**") {
            Some(end) if end > 0 => {
                out.push_str(&rest[..start]);
                out.push_str("<span class=\"highlight\">");
                out.push_str(&after[..end]);
                out.push_str("</span>");
                rest = &after[end + 2..];
            }
            _ => break,
        }
    }

    out.push_str(rest);
    out
}
