// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::Page;
use crate::error::Result;

/// Parse an HTML document and collect everything the scanner reads from it.
///
/// html5ever recovers from any malformed input, so the only failure is an
/// I/O error from the in-memory reader.
pub fn parse_page(html: &str) -> Result<Page> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut page = Page::default();
    let mut form_actions = Vec::new();
    collect(&dom.document, &mut page, &mut form_actions);

    // Anchors first, then form targets
    page.links.extend(form_actions);
    Ok(page)
}

fn collect(handle: &Handle, page: &mut Page, form_actions: &mut Vec<String>) {
    if let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    {
        let attrs = attrs.borrow();
        let attr = |wanted: &str| {
            attrs
                .iter()
                .find(|a| &*a.name.local == wanted)
                .map(|a| a.value.to_string())
        };

        match &*name.local {
            "a" => {
                if let Some(href) = attr("href") {
                    page.links.push(href);
                }
            }
            "form" => {
                if let Some(action) = attr("action") {
                    form_actions.push(action);
                }
            }
            "input" => {
                if let Some(input) = attr("name").filter(|n| !n.is_empty()) {
                    page.input_names.push(input);
                }
            }
            "script" => {
                let body = text_content(handle);
                if !body.trim().is_empty() {
                    page.scripts.push(body);
                }
            }
            _ => {}
        }

        for a in attrs.iter() {
            if a.name.local.len() > 2 && a.name.local.starts_with("on") {
                page.event_handlers.push(a.value.to_string());
            }
        }
    }

    for child in handle.children.borrow().iter() {
        collect(child, page, form_actions);
    }
}

fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            out.push_str(&contents.borrow());
        }
    }
    out
}
