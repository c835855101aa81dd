// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL surface discovery
//!
//! A sequential breadth-first crawler plus the pure scope rules it applies to
//! every extracted link.

mod crawler;
pub mod scope;

pub use crawler::{CrawlConfig, CrawlStats, Crawler};
pub use scope::{is_crawlable, is_same_site, normalize};
