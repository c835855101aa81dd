// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::error::Result;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set a form body, preserving field order
    pub fn form(mut self, fields: &[(String, String)]) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        self.body = Some(Bytes::from(body));
        self.header("content-type", "application/x-www-form-urlencoded")
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Rewrite one query parameter, keeping every other parameter in place.
///
/// The first occurrence of `name` takes the new value and later duplicates are
/// dropped; a missing parameter is appended. The fragment is left untouched.
pub fn set_query_param(url: &Url, name: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for (k, v) in url.query_pairs() {
        if k == name {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }

    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }

    let mut out = url.clone();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_form_body() {
        let fields = vec![
            ("comment".to_string(), "<b>hi</b>".to_string()),
            ("name".to_string(), "a b".to_string()),
        ];
        let req = Request::post("https://example.com/post").unwrap().form(&fields);

        assert_eq!(
            req.body.as_deref(),
            Some(b"comment=%3Cb%3Ehi%3C%2Fb%3E&name=a+b".as_slice())
        );
        assert_eq!(
            req.headers.get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_set_query_param_preserves_others() {
        let url = Url::parse("https://example.com/s?a=1&q=old&b=2").unwrap();
        let out = set_query_param(&url, "q", "<script>");

        let pairs: Vec<(String, String)> = out.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("q".to_string(), "<script>".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_query_param_appends_and_dedups() {
        let url = Url::parse("https://example.com/s?q=1&q=2").unwrap();
        let out = set_query_param(&url, "q", "x");
        assert_eq!(out.query(), Some("q=x"));

        let url = Url::parse("https://example.com/s").unwrap();
        let out = set_query_param(&url, "xss", "1");
        assert_eq!(out.as_str(), "https://example.com/s?xss=1");
    }
}
