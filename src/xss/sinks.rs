// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Static DOM source/sink analysis
//!
//! Inline scripts and event handlers are matched against two ordered rule
//! tables. A page where any sink and any source both match is a candidate
//! DOM XSS flow. This is co-occurrence only; no data flow is tracked.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::Finding;
use crate::dom::parse_page;
use crate::error::Result;

/// A named pattern in one of the rule tables
#[derive(Debug, Clone)]
pub struct DomRule {
    /// Name reported in findings
    pub name: String,
    /// Compiled pattern
    pub pattern: Regex,
}

impl DomRule {
    /// Compile a rule
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }
}

const SINK_PATTERNS: &[(&str, &str)] = &[
    ("innerHTML=", r"\.innerHTML\s*="),
    ("outerHTML=", r"\.outerHTML\s*="),
    ("insertAdjacentHTML(", r"\.insertAdjacentHTML\s*\("),
    (".write(", r"\.write\s*\("),
    (".writeln(", r"\.writeln\s*\("),
    ("document.write(", r"document\.write\s*\("),
    ("document.writeln(", r"document\.writeln\s*\("),
    ("$().html(", r"\$\([^)]*\)\.html\s*\("),
    ("$().append(", r"\$\([^)]*\)\.append\s*\("),
    ("$().prepend(", r"\$\([^)]*\)\.prepend\s*\("),
    ("$().after(", r"\$\([^)]*\)\.after\s*\("),
    ("$().before(", r"\$\([^)]*\)\.before\s*\("),
    ("eval(", r"eval\s*\("),
    ("setTimeout(", r"setTimeout\s*\("),
    ("setInterval(", r"setInterval\s*\("),
    ("new Function(", r"new\s+Function\s*\("),
    ("document.createElement(", r"document\.createElement\s*\("),
    ("location=", r"location\s*="),
    ("location.href=", r"location\.href\s*="),
    ("location.replace(", r"location\.replace\s*\("),
    ("location.assign(", r"location\.assign\s*\("),
    (
        "setAttribute(url)",
        r#"\.setAttribute\s*\(['"](?:src|href|data|action|formaction)['"]"#,
    ),
];

const SOURCE_PATTERNS: &[(&str, &str)] = &[
    ("location", r"location"),
    ("location.href", r"location\.href"),
    ("location.search", r"location\.search"),
    ("location.hash", r"location\.hash"),
    ("document.URL", r"document\.URL"),
    ("document.documentURI", r"document\.documentURI"),
    ("document.referrer", r"document\.referrer"),
    ("document.cookie", r"document\.cookie"),
    ("localStorage", r"localStorage"),
    ("sessionStorage", r"sessionStorage"),
    ("postMessage", r"postMessage"),
    ("onmessage", r"onmessage"),
    (".value", r"\.value"),
    (".innerHTML", r"\.innerHTML"),
    (".outerHTML", r"\.outerHTML"),
    (".textContent", r"\.textContent"),
    (".innerText", r"\.innerText"),
    ("$().val(", r"\$\([^)]*\)\.val\s*\("),
    ("$().text(", r"\$\([^)]*\)\.text\s*\("),
    ("$().html(", r"\$\([^)]*\)\.html\s*\("),
    ("$().attr(", r"\$\([^)]*\)\.attr\s*\("),
];

fn compile(table: &[(&str, &str)]) -> Vec<DomRule> {
    table
        .iter()
        .filter_map(|(name, pattern)| DomRule::new(*name, pattern).ok())
        .collect()
}

lazy_static! {
    static ref SINK_RULES: Vec<DomRule> = compile(SINK_PATTERNS);
    static ref SOURCE_RULES: Vec<DomRule> = compile(SOURCE_PATTERNS);
}

/// Static DOM XSS analyzer
#[derive(Debug, Clone)]
pub struct DomAnalyzer {
    sinks: Vec<DomRule>,
    sources: Vec<DomRule>,
}

impl Default for DomAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DomAnalyzer {
    /// Analyzer with the built-in tables
    pub fn new() -> Self {
        Self {
            sinks: SINK_RULES.clone(),
            sources: SOURCE_RULES.clone(),
        }
    }

    /// Append extra `(name, pattern)` rules to the sink and source tables
    pub fn with_rules(mut self, sinks: &[(&str, &str)], sources: &[(&str, &str)]) -> Result<Self> {
        for (name, pattern) in sinks {
            self.sinks.push(DomRule::new(*name, pattern)?);
        }
        for (name, pattern) in sources {
            self.sources.push(DomRule::new(*name, pattern)?);
        }
        Ok(self)
    }

    /// Sink rules in evaluation order
    pub fn sinks(&self) -> &[DomRule] {
        &self.sinks
    }

    /// Source rules in evaluation order
    pub fn sources(&self) -> &[DomRule] {
        &self.sources
    }

    /// Check a response for a source/sink pair whose code also contains the
    /// payload. Returns the payload on a positive result.
    pub fn analyze(&self, html: &str, payload: &str) -> Option<String> {
        let code = script_code(html)?;
        let (sinks, sources) = self.matches(&code);

        if sinks.is_empty() || sources.is_empty() {
            return None;
        }

        debug!(
            "Potential DOM XSS: Source: {}, Sink: {}",
            sources[0].name, sinks[0].name
        );

        if code.contains(payload) {
            Some(payload.to_string())
        } else {
            None
        }
    }

    /// Report every co-occurring (source, sink) pair on a page
    pub fn scan_page(&self, url: &str, html: &str) -> Vec<Finding> {
        let code = match script_code(html) {
            Some(c) => c,
            None => return Vec::new(),
        };
        let (sinks, sources) = self.matches(&code);

        let findings: Vec<Finding> = sinks
            .iter()
            .flat_map(|sink| {
                sources
                    .iter()
                    .map(move |source| Finding::dom_flow(url, source, sink))
            })
            .collect();

        if !findings.is_empty() {
            warn!(
                "{} potential DOM XSS source/sink pairs on {}",
                findings.len(),
                url
            );
        }

        findings
    }

    fn matches(&self, code: &str) -> (Vec<&DomRule>, Vec<&DomRule>) {
        let sinks = self
            .sinks
            .iter()
            .filter(|r| r.pattern.is_match(code))
            .collect();
        let sources = self
            .sources
            .iter()
            .filter(|r| r.pattern.is_match(code))
            .collect();
        (sinks, sources)
    }
}

/// Inline scripts and event handlers joined into one buffer, with entities
/// decoded by the HTML parser
pub(crate) fn script_code(html: &str) -> Option<String> {
    match parse_page(html) {
        Ok(page) => Some(page.script_buffer()),
        Err(e) => {
            debug!("DOM analysis skipped, parse failed: {}", e);
            None
        }
    }
}
