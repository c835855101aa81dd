// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the XSS scanner
//!
//! Setup-time errors (bad targets, failed login, broken config) are fatal and
//! surface to the caller. Per-request errors are returned to the engine, which
//! downgrades them to "no result" for the unit that produced them.

use thiserror::Error;

/// Result type alias for scanner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scanner
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Network-level failure (connection refused, TLS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Target URL or target list is unusable
    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Form login failed
    #[error("Authentication failed: {reason}")]
    Authentication {
        reason: String,
        url: Option<String>,
        status: Option<u16>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exclusion pattern or analyzer rule did not compile
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Report format is not one of txt/json/html
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an authentication error carrying the login URL and status
    pub fn auth_rejected(url: impl Into<String>, status: u16) -> Self {
        Error::Authentication {
            reason: format!("login returned status {}", status),
            url: Some(url.into()),
            status: Some(status),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
