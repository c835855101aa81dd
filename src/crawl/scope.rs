// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL normalization and crawl scope rules

use regex::Regex;
use url::{Host, Url};

/// Path extensions that never lead to an HTML page
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "ico", "css", "js", "woff", "woff2", "ttf", "eot", "pdf",
    "doc", "xls", "zip", "tar", "gz",
];

/// Canonical form used for deduplication.
///
/// Drops the fragment and every trailing `/`, so `normalize(normalize(u)) ==
/// normalize(u)`. Unparsable input is only trimmed.
pub fn normalize(url: &str) -> String {
    let serialized = match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    };
    serialized.trim_end_matches('/').to_string()
}

/// Registrable domain of a URL's host (`shop.example.co.uk` -> `example.co.uk`).
///
/// IP literals and hosts without a public suffix match (`localhost`) are
/// their own site.
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let domain = domain.to_ascii_lowercase();
            Some(
                psl::domain_str(&domain)
                    .map(str::to_string)
                    .unwrap_or(domain),
            )
        }
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

/// Check whether two URLs belong to the same site
pub fn is_same_site(a: &Url, b: &Url) -> bool {
    match (registrable_domain(a), registrable_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Check the extension list and the optional exclusion pattern against a
/// normalized URL. Unparsable input is never crawlable.
pub fn is_crawlable(url: &str, exclude: Option<&Regex>) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };
    let path = parsed.path().to_ascii_lowercase();
    let excluded_ext = path
        .rsplit_once('.')
        .map(|(_, ext)| !ext.contains('/') && EXCLUDED_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    if excluded_ext {
        return false;
    }

    match exclude {
        Some(pattern) => !pattern.is_match(url),
        None => true,
    }
}

/// Resolve a raw link against the page it was found on.
///
/// Only absolute `http`/`https` URLs with a host survive.
pub fn resolve_link(base: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let resolved = base.join(raw).ok()?;
    match resolved.scheme() {
        "http" | "https" if resolved.host_str().is_some() => Some(resolved),
        _ => None,
    }
}
