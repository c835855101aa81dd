// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Static HTML extraction
//!
//! Parses a page with html5ever and keeps only what the crawler, the input
//! extractor and the DOM analyzer need. Nothing here executes script.

mod parser;

pub use parser::parse_page;

/// The parts of a parsed page the scanner works with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Raw `a[href]` values followed by raw `form[action]` values
    pub links: Vec<String>,
    /// `input[name]` values in document order
    pub input_names: Vec<String>,
    /// Non-empty inline `<script>` bodies
    pub scripts: Vec<String>,
    /// Values of inline `on*` attributes
    pub event_handlers: Vec<String>,
}

impl Page {
    /// Inline scripts followed by event handlers, joined with newlines
    pub fn script_buffer(&self) -> String {
        self.scripts
            .iter()
            .chain(self.event_handlers.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
