// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON report

use serde::Serialize;

use super::Report;
use crate::error::Result;
use crate::xss::Finding;

#[derive(Serialize)]
struct JsonReport<'a> {
    timestamp: String,
    total_vulnerabilities: usize,
    vulnerabilities: &'a [Finding],
}

/// Generate JSON report
pub fn generate(report: &Report) -> Result<String> {
    let doc = JsonReport {
        timestamp: report.timestamp_str(),
        total_vulnerabilities: report.total(),
        vulnerabilities: &report.findings,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
