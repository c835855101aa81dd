// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer
//!
//! Provides the [`Transport`] seam the crawler and injector talk to, plus the
//! reqwest-backed [`HttpClient`] with cookie handling, basic auth and proxy
//! support.

mod client;
mod cookie;
mod request;
mod response;
mod transport;

pub use client::{
    parse_cookie_list, parse_credentials, parse_header_list, HttpClient, HttpClientConfig,
};
pub use cookie::{Cookie, CookieJar};
pub use request::{set_query_param, Request};
pub use response::Response;
pub use transport::Transport;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const AUTHORIZATION: &str = "authorization";
    pub const SERVER: &str = "server";
}
