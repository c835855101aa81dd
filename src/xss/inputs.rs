// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Input surface extraction

use url::Url;

use crate::dom::parse_page;

/// Ordered parameter name -> seed value mapping with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is already present. Returns whether it was added.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, value.into()));
        true
    }

    /// Check if a parameter is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Seed value for a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameters were found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect testable parameters for a page.
///
/// Query parameters come first (first value wins, blank values kept),
/// followed by `<input name>` fields not already present, seeded with "".
pub fn extract_inputs(url: &Url, html: &str) -> ParameterMap {
    let mut params = ParameterMap::new();

    for (name, value) in url.query_pairs() {
        params.insert_if_absent(name.into_owned(), value.into_owned());
    }

    // Parsing never fails on bad markup, only the query part survives otherwise
    if let Ok(page) = parse_page(html) {
        for name in page.input_names {
            params.insert_if_absent(name, "");
        }
    }

    params
}
