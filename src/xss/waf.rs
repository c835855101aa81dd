// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! WAF fingerprinting
//!
//! Advisory only: a verdict is logged and never changes which payloads are
//! sent.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::{set_query_param, Response, Transport};

/// Result of a WAF probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafVerdict {
    /// Whether a WAF was detected
    pub detected: bool,
    /// Product name, or "Generic" when only blocking behaviour was seen
    pub label: Option<String>,
}

impl WafVerdict {
    /// No WAF seen
    pub fn none() -> Self {
        Self::default()
    }

    /// A WAF with the given label
    pub fn detected(label: impl Into<String>) -> Self {
        Self {
            detected: true,
            label: Some(label.into()),
        }
    }
}

/// Detects a web application firewall in front of a target
#[async_trait]
pub trait WafProbe: Send + Sync {
    /// Probe `url`. Failures are reported as "not detected".
    async fn detect(&self, url: &str) -> WafVerdict;
}

/// Known WAF fingerprint
#[derive(Debug, Clone, Copy)]
pub struct WafSignature {
    pub name: &'static str,
    /// (header name, lowercase value substring); empty value = header present
    pub headers: &'static [(&'static str, &'static str)],
    /// Lowercase body substrings
    pub body_patterns: &'static [&'static str],
}

/// Built-in WAF fingerprints
pub const WAF_SIGNATURES: &[WafSignature] = &[
    WafSignature {
        name: "Cloudflare",
        headers: &[("server", "cloudflare"), ("cf-ray", "")],
        body_patterns: &["attention required! | cloudflare", "cloudflare ray id"],
    },
    WafSignature {
        name: "Akamai",
        headers: &[("server", "akamaighost"), ("x-akamai-transformed", "")],
        body_patterns: &["reference #18."],
    },
    WafSignature {
        name: "Sucuri",
        headers: &[("server", "sucuri"), ("x-sucuri-id", "")],
        body_patterns: &["sucuri website firewall"],
    },
    WafSignature {
        name: "Imperva Incapsula",
        headers: &[("x-iinfo", ""), ("x-cdn", "incapsula")],
        body_patterns: &["incapsula incident id"],
    },
    WafSignature {
        name: "AWS WAF",
        headers: &[("x-amzn-waf-action", ""), ("server", "awselb")],
        body_patterns: &["request blocked", "aws waf"],
    },
    WafSignature {
        name: "ModSecurity",
        headers: &[("server", "mod_security")],
        body_patterns: &["mod_security", "modsecurity", "not acceptable!"],
    },
    WafSignature {
        name: "F5 BIG-IP",
        headers: &[("x-wa-info", ""), ("server", "bigip")],
        body_patterns: &["the requested url was rejected"],
    },
];

/// Statuses a blocking WAF typically answers a malicious probe with
const BLOCK_STATUSES: &[u16] = &[403, 406, 419, 429, 501, 999];

const PROBE_PARAM: &str = "xss_waf_probe";
const PROBE_PAYLOAD: &str = "<script>alert('xss')</script>";

/// Header/status/body signature probe
pub struct SignatureWafProbe {
    transport: Arc<dyn Transport>,
}

impl SignatureWafProbe {
    /// Create a probe using `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Match a response against the signature table
    pub fn match_signature(response: &Response) -> Option<&'static str> {
        let body = response.text_lossy().to_lowercase();

        WAF_SIGNATURES
            .iter()
            .find(|sig| {
                let header_hit = sig.headers.iter().any(|(name, needle)| {
                    response
                        .header_all(name)
                        .iter()
                        .any(|v| needle.is_empty() || v.to_lowercase().contains(needle))
                });
                header_hit || sig.body_patterns.iter().any(|p| body.contains(p))
            })
            .map(|sig| sig.name)
    }
}

#[async_trait]
impl WafProbe for SignatureWafProbe {
    async fn detect(&self, url: &str) -> WafVerdict {
        let probe_url = match Url::parse(url) {
            Ok(u) => set_query_param(&u, PROBE_PARAM, PROBE_PAYLOAD),
            Err(_) => return WafVerdict::none(),
        };

        let response = match self.transport.get(probe_url.as_str()).await {
            Ok(r) => r,
            Err(e) => {
                debug!("WAF probe failed for {}: {}", url, e);
                return WafVerdict::none();
            }
        };

        if let Some(name) = Self::match_signature(&response) {
            return WafVerdict::detected(name);
        }

        if BLOCK_STATUSES.contains(&response.status_code()) {
            return WafVerdict::detected("Generic");
        }

        WafVerdict::none()
    }
}
