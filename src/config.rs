// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! File-based settings
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Command line flags are applied on top by the
//! binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::crawl::CrawlConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};
use crate::reporting::ReportFormat;
use crate::xss::{MethodSelection, PayloadEncoding, ScanConfig};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "xss_hunter.toml";

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scanner: ScannerSettings,
    pub crawler: CrawlerSettings,
    pub reporting: ReportingSettings,
    pub proxy: ProxySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    /// Request timeout in seconds
    pub timeout: u64,
    /// Delay before each request in seconds
    pub delay: f64,
    /// Concurrent test units
    pub threads: usize,
    pub user_agent: Option<String>,
    /// get, post or all
    pub methods: String,
    pub dom: bool,
    pub stored: bool,
    pub waf_bypass: bool,
    pub polyglot: bool,
    /// Accepted for compatibility; no blind payloads are sent
    pub blind: bool,
    pub encoding: PayloadEncoding,
    /// Extra payload file appended to the corpus
    pub payloads: Option<PathBuf>,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            timeout: 10,
            delay: 0.1,
            threads: 5,
            user_agent: None,
            methods: "all".to_string(),
            dom: false,
            stored: false,
            waf_bypass: false,
            polyglot: false,
            blind: false,
            encoding: PayloadEncoding::None,
            payloads: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    pub enabled: bool,
    pub depth: u32,
    /// Regex; matching URLs are not crawled
    pub exclude: Option<String>,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            depth: 2,
            exclude: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// txt, json, html or all
    pub format: String,
    /// Base file name; reports are only written when set
    pub output: Option<String>,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            format: "all".to_string(),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub url: Option<String>,
    /// user:pass
    pub auth: Option<String>,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist and parse. Without one, `xss_hunter.toml`
    /// in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config from {}: {}", path.display(), e))
        })?;
        let settings = Self::from_toml(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    /// Parse TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Per-request delay. Negative values mean no delay; non-finite or
    /// out-of-range values are a configuration error.
    pub fn delay(&self) -> Result<Duration> {
        let secs = self.scanner.delay;
        if !secs.is_finite() {
            return Err(Error::config(format!("Invalid delay: {}", secs)));
        }
        Duration::try_from_secs_f64(secs.max(0.0))
            .map_err(|e| Error::config(format!("Invalid delay {}: {}", secs, e)))
    }

    /// Injection settings
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let methods: MethodSelection = self.scanner.methods.parse()?;
        Ok(ScanConfig::new()
            .methods(methods)
            .dom(self.scanner.dom)
            .stored(self.scanner.stored)
            .waf_bypass(self.scanner.waf_bypass)
            .threads(self.scanner.threads)
            .delay(self.delay()?)
            .encoding(self.scanner.encoding))
    }

    /// Crawl settings
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        let config = CrawlConfig::new()
            .max_depth(self.crawler.depth)
            .delay(self.delay()?);
        match self.crawler.exclude.as_deref() {
            Some(pattern) => config.exclude(pattern),
            None => Ok(config),
        }
    }

    /// Transport settings, without per-run headers, cookies or credentials
    pub fn http_config(&self) -> HttpClientConfig {
        let user_agent = self
            .scanner
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT);
        let config = HttpClientConfig::new()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(self.scanner.timeout));
        match self.proxy.url.as_deref() {
            Some(proxy) => config.proxy(proxy, self.proxy.auth.as_deref()),
            None => config,
        }
    }

    /// Report formats to write
    pub fn report_format(&self) -> Result<ReportFormat> {
        self.reporting.format.parse()
    }
}

/// Check that `raw` is an absolute http(s) URL
pub fn validate_target(raw: &str) -> Result<String> {
    let url = url::Url::parse(raw.trim())
        .map_err(|e| Error::invalid_target(raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url.to_string()),
        scheme => Err(Error::invalid_target(
            raw,
            format!("unsupported scheme '{}'", scheme),
        )),
    }
}

/// Read a target list: one URL per line, blank lines and `#` comments
/// skipped, invalid entries dropped with a warning. An unreadable file or a
/// list without a single valid URL is an error.
pub fn load_targets(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    let mut targets = Vec::new();

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match validate_target(line) {
            Ok(url) => targets.push(url),
            Err(e) => warn!("Skipping target: {}", e),
        }
    }

    if targets.is_empty() {
        return Err(Error::invalid_target(
            path.display().to_string(),
            "no valid URLs in target list",
        ));
    }

    info!("Loaded {} targets from {}", targets.len(), path.display());
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scanner.threads, 5);
        assert_eq!(settings.crawler.depth, 2);
        assert_eq!(settings.delay().unwrap(), Duration::from_millis(100));

        let scan = settings.scan_config().unwrap();
        assert_eq!(scan.methods, MethodSelection::All);
        assert!(!scan.dom && !scan.stored);
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[scanner]
threads = 12
methods = "post"
dom = true
encoding = "double_url"

[crawler]
depth = 4
exclude = "logout"

[proxy]
url = "http://127.0.0.1:8080"
auth = "bob:pw"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.scanner.threads, 12);
        assert_eq!(settings.scanner.timeout, 10);
        assert_eq!(settings.scanner.encoding, PayloadEncoding::DoubleUrl);

        let scan = settings.scan_config().unwrap();
        assert_eq!(scan.methods, MethodSelection::Post);
        assert!(scan.dom);

        let crawl = settings.crawl_config().unwrap();
        assert_eq!(crawl.max_depth, 4);
        assert!(crawl.exclude.is_some());

        let http = settings.http_config();
        assert_eq!(http.proxy.as_deref(), Some("http://bob:pw@127.0.0.1:8080"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scanner]\nthreads = \"many\"").unwrap();
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/xss_hunter.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_method_selection() {
        let settings = Settings::from_toml("[scanner]\nmethods = \"put\"").unwrap();
        assert!(settings.scan_config().is_err());
    }

    #[test]
    fn test_delay_must_be_finite() {
        let mut settings = Settings::default();
        settings.scanner.delay = f64::INFINITY;
        assert!(matches!(settings.delay(), Err(Error::Config(_))));
        assert!(settings.scan_config().is_err());
        assert!(settings.crawl_config().is_err());

        settings.scanner.delay = f64::NAN;
        assert!(matches!(settings.delay(), Err(Error::Config(_))));

        settings.scanner.delay = 1e30;
        assert!(matches!(settings.delay(), Err(Error::Config(_))));

        settings.scanner.delay = -2.0;
        assert_eq!(settings.delay().unwrap(), Duration::ZERO);

        let settings = Settings::from_toml("[scanner]\ndelay = inf").unwrap();
        assert!(settings.scan_config().is_err());
    }

    #[test]
    fn test_validate_target() {
        assert_eq!(validate_target(" http://a.test ").unwrap(), "http://a.test/");
        assert!(matches!(
            validate_target("ftp://a.test/"),
            Err(Error::InvalidTarget { .. })
        ));
        assert!(validate_target("not a url").is_err());
    }

    #[test]
    fn test_load_targets() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://a.test/one\n\n# staging\nnot-a-url\nhttps://b.test/two?x=1").unwrap();

        let targets = load_targets(file.path()).unwrap();
        assert_eq!(targets, vec!["http://a.test/one", "https://b.test/two?x=1"]);
    }

    #[test]
    fn test_load_targets_failures() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "garbage\n   ").unwrap();
        assert!(matches!(
            load_targets(file.path()),
            Err(Error::InvalidTarget { .. })
        ));
        assert!(matches!(
            load_targets(Path::new("/nonexistent/targets.txt")),
            Err(Error::Io(_))
        ));
    }
}
