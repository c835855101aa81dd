// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Stored XSS detection flow
//!
//! Detects stored/persistent XSS by:
//! 1. Submitting the raw payload as a form field
//! 2. Waiting for the target to persist it
//! 3. Re-fetching the page and looking for the payload

use std::time::Duration;

use tracing::debug;

use super::evidence::extract_evidence;
use super::{Finding, FindingType, HttpMethod};
use crate::error::Result;
use crate::http::Transport;

/// Submission statuses treated as accepted
pub const ACCEPTED_STATUSES: &[u16] = &[200, 201, 302];

/// Default wait between submission and verification
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// One stored XSS probe: a payload submitted into a single parameter
#[derive(Debug, Clone)]
pub struct StoredProbe<'a> {
    /// Page the payload is posted to and read back from
    pub url: &'a str,
    /// Parameter carrying the payload
    pub parameter: &'a str,
    /// Raw payload
    pub payload: &'a str,
}

impl<'a> StoredProbe<'a> {
    /// Create a probe
    pub fn new(url: &'a str, parameter: &'a str, payload: &'a str) -> Self {
        Self {
            url,
            parameter,
            payload,
        }
    }

    /// Submit, wait `settle`, then verify.
    ///
    /// `Ok(None)` covers both a rejected submission and a payload that did not
    /// come back. Transport errors are returned to the caller.
    pub async fn run(&self, transport: &dyn Transport, settle: Duration) -> Result<Option<Finding>> {
        let fields = vec![(self.parameter.to_string(), self.payload.to_string())];
        let submitted = transport.post_form(self.url, &fields).await?;

        if !ACCEPTED_STATUSES.contains(&submitted.status_code()) {
            debug!(
                "Stored probe on {} rejected with status {}",
                self.parameter,
                submitted.status_code()
            );
            return Ok(None);
        }

        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }

        let body = transport.get(self.url).await?.text_lossy();
        if !body.contains(self.payload) {
            return Ok(None);
        }

        Ok(Some(Finding::for_parameter(
            FindingType::Stored,
            self.url,
            self.parameter,
            self.payload,
            HttpMethod::Post,
            extract_evidence(&body, self.payload),
        )))
    }
}
