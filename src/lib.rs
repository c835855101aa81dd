// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # xss-hunter - XSS Discovery & Injection Engine
//!
//! Crawls a site within its registrable domain, enumerates the input surface
//! of every page and fires a payload corpus at each parameter over GET and
//! POST to find reflected, stored and DOM-based XSS.
//!
//! ## Features
//!
//! - Bounded breadth-first crawler with scope and extension filtering
//! - Parameter x payload x method test matrix on a bounded worker pool
//! - Reflection evidence with payload highlighting
//! - Static DOM source/sink analysis of inline scripts and event handlers
//! - Stored XSS probe (submit, settle, verify)
//! - Advisory WAF fingerprinting
//! - Payload encodings, custom payload files
//! - Cookie jar, basic auth, form login, proxy support
//! - Text, JSON and HTML reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xss_hunter::{HttpClient, Injector, PayloadCorpus, ScanConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(HttpClient::new()?);
//!     let corpus = PayloadCorpus::build(true, false, false);
//!     let injector = Injector::new(client, ScanConfig::new().dom(true), corpus);
//!
//!     for finding in injector.scan_target("https://example.com/search?q=1").await {
//!         println!("{}", finding);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawl;
pub mod dom;
pub mod error;
pub mod http;
pub mod reporting;
pub mod xss;

// Re-exports for convenience

// Configuration
pub use config::Settings;

// Crawler
pub use crawl::{CrawlConfig, CrawlStats, Crawler};

// DOM
pub use dom::{parse_page, Page};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{Cookie, CookieJar, HttpClient, HttpClientConfig, Request, Response, Transport};

// Reporting
pub use reporting::{Report, ReportFormat};

// XSS
pub use xss::{Finding, FindingSink, FindingType, HttpMethod};
pub use xss::{Injector, MethodSelection, ScanConfig, UnitOutcome};
pub use xss::{DomAnalyzer, PayloadCorpus, PayloadEncoding};
pub use xss::{SignatureWafProbe, WafProbe, WafVerdict};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
