// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Breadth-first crawler for discovering in-scope pages

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

use super::scope::{is_crawlable, is_same_site, normalize, resolve_link};
use crate::dom::parse_page;
use crate::error::{Error, Result};
use crate::http::Transport;

/// Crawler configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum depth to crawl
    pub max_depth: u32,
    /// Delay before each request
    pub delay: Duration,
    /// URLs matching this pattern are never queued
    pub exclude: Option<Regex>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            delay: Duration::from_millis(100),
            exclude: None,
        }
    }
}

impl CrawlConfig {
    /// Create a new crawler config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max depth
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set delay between requests
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the exclusion pattern
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

/// Counters for one crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages requested
    pub pages_fetched: usize,
    /// Requests that failed at the transport level
    pub fetch_failures: usize,
    /// Responses skipped because they were not HTML
    pub non_html: usize,
}

#[derive(Debug)]
struct CrawlTask {
    url: String,
    depth: u32,
}

/// Per-call crawl state
#[derive(Default)]
struct CrawlState {
    visited: HashSet<String>,
    seen: HashSet<String>,
    discovered: Vec<String>,
    queue: VecDeque<CrawlTask>,
    stats: CrawlStats,
}

impl CrawlState {
    /// Record a URL once and queue it at `depth`
    fn discover(&mut self, url: String, depth: u32) {
        if self.seen.insert(url.clone()) {
            self.discovered.push(url.clone());
            self.queue.push_back(CrawlTask { url, depth });
        }
    }
}

/// Web crawler
pub struct Crawler {
    config: CrawlConfig,
    transport: Arc<dyn Transport>,
}

impl Crawler {
    /// Create a new crawler
    pub fn new(transport: Arc<dyn Transport>, config: CrawlConfig) -> Self {
        Self { config, transport }
    }

    /// Create crawler with default config
    pub fn with_defaults(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, CrawlConfig::default())
    }

    /// Get crawler configuration
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl from `start_url` and return every in-scope URL found, start first.
    ///
    /// Only an unusable start URL is an error; fetch failures just yield no
    /// links for that page.
    pub async fn crawl(&self, start_url: &str) -> Result<Vec<String>> {
        self.crawl_with_stats(start_url)
            .await
            .map(|(discovered, _)| discovered)
    }

    /// Same as [`crawl`](Self::crawl), also returning the crawl counters
    pub async fn crawl_with_stats(&self, start_url: &str) -> Result<(Vec<String>, CrawlStats)> {
        let start = normalize(start_url);
        let start_parsed = Url::parse(&start)?;
        if !matches!(start_parsed.scheme(), "http" | "https") || start_parsed.host_str().is_none()
        {
            return Err(Error::invalid_target(start_url, "not an http(s) URL"));
        }

        let span = info_span!("crawl", start = %start);
        async move {
            let mut state = CrawlState::default();
            state.discover(start, 0);

            while let Some(task) = state.queue.pop_front() {
                if state.visited.contains(&task.url) || task.depth > self.config.max_depth {
                    continue;
                }
                state.visited.insert(task.url.clone());

                let links = self.visit(&task.url, &start_parsed, &mut state.stats).await;
                for link in links {
                    state.discover(link, task.depth + 1);
                }
            }

            info!(
                "Crawl finished: {} URLs discovered, {} fetched, {} failed, {} non-HTML",
                state.discovered.len(),
                state.stats.pages_fetched,
                state.stats.fetch_failures,
                state.stats.non_html
            );

            Ok((state.discovered, state.stats))
        }
        .instrument(span)
        .await
    }

    /// Fetch one page and return its in-scope links, normalized
    async fn visit(&self, url: &str, start: &Url, stats: &mut CrawlStats) -> Vec<String> {
        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        stats.pages_fetched += 1;
        let response = match self.transport.get(url).await {
            Ok(r) => r,
            Err(e) => {
                stats.fetch_failures += 1;
                debug!("Fetch failed for {}: {}", url, e);
                return Vec::new();
            }
        };

        if !response.is_html() {
            stats.non_html += 1;
            debug!("Skipping non-HTML response from {}", url);
            return Vec::new();
        }

        let page = match parse_page(&response.text_lossy()) {
            Ok(p) => p,
            Err(e) => {
                debug!("Could not parse {}: {}", url, e);
                return Vec::new();
            }
        };

        // Relative links resolve against the page as requested
        let base = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return Vec::new(),
        };

        page.links
            .iter()
            .filter_map(|raw| resolve_link(&base, raw))
            .filter(|link| is_same_site(link, start))
            .map(|link| normalize(link.as_str()))
            .filter(|link| is_crawlable(link, self.config.exclude.as_ref()))
            .collect()
    }
}
