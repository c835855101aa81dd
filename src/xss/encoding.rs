// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Payload encodings applied before submission

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Everything except unreserved characters and `/` is escaped
const QUOTE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Transformation applied to a payload before it goes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// Pass-through
    #[default]
    None,
    /// Percent encoding
    Url,
    /// Percent encoding applied twice
    DoubleUrl,
    /// HTML entity escaping of `& < > " '`
    Html,
    /// Standard base64
    Base64,
    /// `\xNN` per character
    Hex,
    /// `\uNNNN` per character
    Unicode,
    /// `\NNN` per character
    Octal,
}

impl PayloadEncoding {
    /// Every supported encoding
    pub fn all() -> &'static [PayloadEncoding] {
        &[
            PayloadEncoding::None,
            PayloadEncoding::Url,
            PayloadEncoding::DoubleUrl,
            PayloadEncoding::Html,
            PayloadEncoding::Base64,
            PayloadEncoding::Hex,
            PayloadEncoding::Unicode,
            PayloadEncoding::Octal,
        ]
    }

    /// Name accepted on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            PayloadEncoding::None => "none",
            PayloadEncoding::Url => "url",
            PayloadEncoding::DoubleUrl => "double_url",
            PayloadEncoding::Html => "html",
            PayloadEncoding::Base64 => "base64",
            PayloadEncoding::Hex => "hex",
            PayloadEncoding::Unicode => "unicode",
            PayloadEncoding::Octal => "octal",
        }
    }

    /// Encode a payload
    pub fn encode(&self, payload: &str) -> String {
        match self {
            PayloadEncoding::None => payload.to_string(),
            PayloadEncoding::Url => url_quote(payload),
            PayloadEncoding::DoubleUrl => url_quote(&url_quote(payload)),
            PayloadEncoding::Html => html_escape(payload),
            PayloadEncoding::Base64 => STANDARD.encode(payload.as_bytes()),
            PayloadEncoding::Hex => payload
                .chars()
                .map(|c| format!("\\x{:02x}", c as u32))
                .collect(),
            PayloadEncoding::Unicode => payload
                .chars()
                .map(|c| format!("\\u{:04x}", c as u32))
                .collect(),
            PayloadEncoding::Octal => payload
                .chars()
                .map(|c| format!("\\{:03o}", c as u32))
                .collect(),
        }
    }
}

impl fmt::Display for PayloadEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PayloadEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PayloadEncoding::all()
            .iter()
            .copied()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| Error::config(format!("Unknown payload encoding: {}", s)))
    }
}

fn url_quote(input: &str) -> String {
    utf8_percent_encode(input, QUOTE_SET).to_string()
}

pub(crate) fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
