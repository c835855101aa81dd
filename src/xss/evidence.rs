// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Reflection evidence extraction

/// Evidence recorded when the payload cannot be located in the body
pub const NOT_FOUND_EVIDENCE: &str = "Payload not found directly in response";

/// Characters of context kept on each side of the match
pub const CONTEXT_CHARS: usize = 50;

/// Extract a snippet around the first occurrence of `payload` in `body`.
///
/// Every occurrence of the payload inside the snippet is wrapped as
/// `**payload**`. Offsets are counted in characters, never splitting a
/// multi-byte character. An empty payload matches at offset 0 and yields the
/// unmarked leading window.
pub fn extract_evidence(body: &str, payload: &str) -> String {
    if payload.is_empty() {
        return body.chars().take(CONTEXT_CHARS).collect();
    }

    let pos = match body.find(payload) {
        Some(p) => p,
        None => return NOT_FOUND_EVIDENCE.to_string(),
    };

    let start = body[..pos]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let match_end = pos + payload.len();
    let end = body[match_end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| match_end + i)
        .unwrap_or(body.len());

    body[start..end].replace(payload, &format!("**{}**", payload))
}
