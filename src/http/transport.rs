// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the engine and the network

use async_trait::async_trait;

use super::Response;
use crate::error::Result;

/// Outbound request transport used by the crawler and the injector.
///
/// Implementations apply their own headers, cookies, auth, proxy and timeout
/// policy. Every failure comes back as an `Err`; callers decide whether it is
/// fatal.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use xss_hunter::http::{HttpClient, Transport};
///
/// # async fn run() -> xss_hunter::Result<()> {
/// let transport: Arc<dyn Transport> = Arc::new(HttpClient::new()?);
/// let response = transport.get("https://example.com/").await?;
/// println!("{} bytes", response.body_len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request. The query string is part of `url`.
    async fn get(&self, url: &str) -> Result<Response>;

    /// Issue a POST request with an `application/x-www-form-urlencoded` body
    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Response>;
}
