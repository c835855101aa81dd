// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XSS detection module
//!
//! Provides the injection engine and its collaborators:
//! - input surface extraction
//! - the parameter x payload x method test matrix
//! - reflection evidence extraction
//! - static DOM source/sink analysis
//! - stored XSS probing
//! - advisory WAF fingerprinting

pub mod encoding;
pub mod evidence;
pub mod injector;
pub mod inputs;
pub mod payloads;
pub mod pool;
pub mod sinks;
pub mod stored;
pub mod waf;

pub use encoding::PayloadEncoding;
pub use evidence::{extract_evidence, NOT_FOUND_EVIDENCE};
pub use injector::{
    build_matrix, Injector, MethodSelection, ScanConfig, TestUnit, UnitKind, UnitOutcome,
};
pub use inputs::{extract_inputs, ParameterMap};
pub use payloads::PayloadCorpus;
pub use pool::{PoolStats, WorkerPool};
pub use sinks::{DomAnalyzer, DomRule};
pub use waf::{SignatureWafProbe, WafProbe, WafVerdict};

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Kind of XSS a finding reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingType {
    /// Payload echoed back in the immediate response
    #[serde(rename = "Reflected XSS")]
    Reflected,
    /// Payload persisted and served on a later request
    #[serde(rename = "Stored XSS")]
    Stored,
    /// Source/sink flow in client-side script
    #[serde(rename = "DOM-based XSS")]
    Dom,
}

impl FindingType {
    /// Human-readable label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            FindingType::Reflected => "Reflected XSS",
            FindingType::Stored => "Stored XSS",
            FindingType::Dom => "DOM-based XSS",
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request method a payload was submitted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// A detected XSS weakness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// URL the finding applies to
    pub url: String,
    /// Tested parameter (absent for page-level DOM findings)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Raw payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Payload as it was put on the wire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_payload: Option<String>,
    /// Submission method
    pub method: HttpMethod,
    /// Finding kind
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    /// Context snippet or flow description
    pub evidence: String,
    /// DOM source pattern name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// DOM sink pattern name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink: Option<String>,
}

impl Finding {
    /// A payload-driven finding for one parameter
    pub fn for_parameter(
        finding_type: FindingType,
        url: impl Into<String>,
        parameter: impl Into<String>,
        payload: impl Into<String>,
        method: HttpMethod,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            parameter: Some(parameter.into()),
            payload: Some(payload.into()),
            encoded_payload: None,
            method,
            finding_type,
            evidence: evidence.into(),
            source: None,
            sink: None,
        }
    }

    /// A page-level DOM source/sink co-occurrence. The rule names go into
    /// `source`/`sink`; the evidence carries both patterns.
    pub fn dom_flow(url: impl Into<String>, source: &DomRule, sink: &DomRule) -> Self {
        Self {
            url: url.into(),
            parameter: None,
            payload: None,
            encoded_payload: None,
            method: HttpMethod::Get,
            finding_type: FindingType::Dom,
            evidence: format!(
                "Source: {}, Sink: {}",
                source.pattern.as_str(),
                sink.pattern.as_str()
            ),
            source: Some(source.name.clone()),
            sink: Some(sink.name.clone()),
        }
    }

    /// Attach the encoded form of the payload
    pub fn with_encoded_payload(mut self, encoded: impl Into<String>) -> Self {
        self.encoded_payload = Some(encoded.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.finding_type, self.method, self.url)?;
        if let Some(ref parameter) = self.parameter {
            write!(f, " (parameter: {})", parameter)?;
        }
        Ok(())
    }
}

/// Shared, append-only collection of findings for one scan
#[derive(Debug, Clone, Default)]
pub struct FindingSink {
    inner: Arc<Mutex<Vec<Finding>>>,
}

impl FindingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding
    pub fn push(&self, finding: Finding) {
        self.inner.lock().push(finding);
    }

    /// Append several findings
    pub fn extend(&self, findings: impl IntoIterator<Item = Finding>) {
        self.inner.lock().extend(findings);
    }

    /// Number of findings so far
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing was found
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the findings in insertion order
    pub fn snapshot(&self) -> Vec<Finding> {
        self.inner.lock().clone()
    }

    /// Take the findings out, leaving the sink empty
    pub fn take(&self) -> Vec<Finding> {
        std::mem::take(&mut *self.inner.lock())
    }
}
