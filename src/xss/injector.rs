// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Injection dispatcher
//!
//! For each target the injector fetches a baseline, derives the parameter
//! map and runs every parameter x payload x method unit on a bounded worker
//! pool. A unit never fails the scan: transport errors become
//! [`UnitOutcome::Failed`] and are only counted.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

use super::encoding::PayloadEncoding;
use super::evidence::extract_evidence;
use super::inputs::{extract_inputs, ParameterMap};
use super::payloads::PayloadCorpus;
use super::pool::WorkerPool;
use super::sinks::{script_code, DomAnalyzer};
use super::stored::{StoredProbe, DEFAULT_SETTLE_DELAY};
use super::waf::{SignatureWafProbe, WafProbe};
use super::{Finding, FindingSink, FindingType, HttpMethod};
use crate::error::{Error, Result};
use crate::http::{set_query_param, Transport};

/// Parameter used when a page exposes no inputs of its own
pub const FALLBACK_PARAMETER: &str = "xss";

/// Payloads tried against the fallback parameter
pub const FALLBACK_PAYLOADS: usize = 5;

/// Which request methods each payload is sent with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodSelection {
    Get,
    Post,
    #[default]
    All,
}

impl MethodSelection {
    /// Methods in submission order
    pub fn methods(&self) -> &'static [HttpMethod] {
        match self {
            MethodSelection::Get => &[HttpMethod::Get],
            MethodSelection::Post => &[HttpMethod::Post],
            MethodSelection::All => &[HttpMethod::Get, HttpMethod::Post],
        }
    }
}

impl FromStr for MethodSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(MethodSelection::Get),
            "post" => Ok(MethodSelection::Post),
            "all" => Ok(MethodSelection::All),
            other => Err(Error::config(format!("Unknown method selection: {}", other))),
        }
    }
}

impl fmt::Display for MethodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodSelection::Get => f.write_str("get"),
            MethodSelection::Post => f.write_str("post"),
            MethodSelection::All => f.write_str("all"),
        }
    }
}

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Methods to test
    pub methods: MethodSelection,
    /// Run DOM analysis on responses and on the baseline page
    pub dom: bool,
    /// Add one stored probe per (parameter, payload)
    pub stored: bool,
    /// Probe for a WAF before scanning
    pub waf_bypass: bool,
    /// Concurrent units
    pub threads: usize,
    /// Delay before each unit's request
    pub delay: Duration,
    /// Wait between a stored submission and its verification
    pub stored_settle: Duration,
    /// Encoding applied to payloads before submission
    pub encoding: PayloadEncoding,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            methods: MethodSelection::All,
            dom: false,
            stored: false,
            waf_bypass: false,
            threads: 5,
            delay: Duration::from_millis(100),
            stored_settle: DEFAULT_SETTLE_DELAY,
            encoding: PayloadEncoding::None,
        }
    }
}

impl ScanConfig {
    /// Create a new scan config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set methods
    pub fn methods(mut self, methods: MethodSelection) -> Self {
        self.methods = methods;
        self
    }

    /// Enable DOM analysis
    pub fn dom(mut self, enabled: bool) -> Self {
        self.dom = enabled;
        self
    }

    /// Enable stored probes
    pub fn stored(mut self, enabled: bool) -> Self {
        self.stored = enabled;
        self
    }

    /// Enable the WAF probe
    pub fn waf_bypass(mut self, enabled: bool) -> Self {
        self.waf_bypass = enabled;
        self
    }

    /// Set worker count
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set per-unit delay
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set stored probe settle delay
    pub fn stored_settle(mut self, settle: Duration) -> Self {
        self.stored_settle = settle;
        self
    }

    /// Set payload encoding
    pub fn encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// What a unit submits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Single request, checked for reflection and DOM flow
    Reflected(HttpMethod),
    /// POST then verifying GET
    Stored,
}

/// One cell of the test matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUnit {
    pub parameter: String,
    pub payload: String,
    pub kind: UnitKind,
}

/// Result of running one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Vulnerable(Finding),
    NotVulnerable,
    /// The unit could not be completed; carries the error text
    Failed(String),
}

/// Build the full matrix for a parameter map.
///
/// Order: parameter, then payload, then GET/POST, then the stored probe.
pub fn build_matrix(
    params: &ParameterMap,
    corpus: &PayloadCorpus,
    methods: MethodSelection,
    stored: bool,
) -> Vec<TestUnit> {
    let per_cell = methods.methods().len() + usize::from(stored);
    let mut units = Vec::with_capacity(params.len() * corpus.len() * per_cell);

    for parameter in params.names() {
        for payload in corpus.iter() {
            for method in methods.methods() {
                units.push(TestUnit {
                    parameter: parameter.to_string(),
                    payload: payload.clone(),
                    kind: UnitKind::Reflected(*method),
                });
            }
            if stored {
                units.push(TestUnit {
                    parameter: parameter.to_string(),
                    payload: payload.clone(),
                    kind: UnitKind::Stored,
                });
            }
        }
    }

    units
}

/// State shared by every unit of one target
struct UnitContext {
    transport: Arc<dyn Transport>,
    dom: Option<Arc<DomAnalyzer>>,
    target: Url,
    delay: Duration,
    stored_settle: Duration,
    encoding: PayloadEncoding,
}

impl UnitContext {
    async fn run(&self, unit: TestUnit) -> UnitOutcome {
        let result = match unit.kind {
            UnitKind::Reflected(method) => self.run_reflected(&unit, method).await,
            UnitKind::Stored => {
                StoredProbe::new(self.target.as_str(), &unit.parameter, &unit.payload)
                    .run(self.transport.as_ref(), self.stored_settle)
                    .await
            }
        };

        match result {
            Ok(Some(finding)) => UnitOutcome::Vulnerable(finding),
            Ok(None) => UnitOutcome::NotVulnerable,
            Err(e) if e.is_timeout() => {
                debug!(
                    "Timed out testing parameter {} with payload {}",
                    unit.parameter, unit.payload
                );
                UnitOutcome::Failed(e.to_string())
            }
            Err(e) => {
                debug!(
                    "Error testing parameter {} with payload {}: {}",
                    unit.parameter, unit.payload, e
                );
                UnitOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run_reflected(&self, unit: &TestUnit, method: HttpMethod) -> Result<Option<Finding>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let encoded = self.encoding.encode(&unit.payload);
        let response = match method {
            HttpMethod::Get => {
                let test_url = set_query_param(&self.target, &unit.parameter, &encoded);
                self.transport.get(test_url.as_str()).await?
            }
            HttpMethod::Post => {
                let fields = vec![(unit.parameter.clone(), encoded.clone())];
                self.transport
                    .post_form(self.target.as_str(), &fields)
                    .await?
            }
        };
        let body = response.text_lossy();

        let reflected = if body.contains(&unit.payload) {
            Some(unit.payload.as_str())
        } else if body.contains(&encoded) {
            Some(encoded.as_str())
        } else {
            None
        };

        let finding_type = match (reflected, &self.dom) {
            (Some(_), _) => FindingType::Reflected,
            (None, Some(dom)) if dom.analyze(&body, &unit.payload).is_some() => FindingType::Dom,
            _ => return Ok(None),
        };

        // DOM matches are made against the decoded script buffer, not the raw body
        let evidence = match reflected {
            Some(matched) => extract_evidence(&body, matched),
            None => extract_evidence(&script_code(&body).unwrap_or_default(), &unit.payload),
        };
        Ok(Some(
            Finding::for_parameter(
                finding_type,
                self.target.as_str(),
                &unit.parameter,
                &unit.payload,
                method,
                evidence,
            )
            .with_encoded_payload(encoded),
        ))
    }
}

/// XSS injection engine
pub struct Injector {
    transport: Arc<dyn Transport>,
    config: ScanConfig,
    corpus: Arc<PayloadCorpus>,
    dom: Option<Arc<DomAnalyzer>>,
    waf: Option<Arc<dyn WafProbe>>,
}

impl Injector {
    /// Create an injector. DOM analysis and the WAF probe are set up from
    /// the config flags.
    pub fn new(transport: Arc<dyn Transport>, config: ScanConfig, corpus: PayloadCorpus) -> Self {
        let dom = config.dom.then(|| Arc::new(DomAnalyzer::new()));
        let waf = config.waf_bypass.then(|| {
            Arc::new(SignatureWafProbe::new(Arc::clone(&transport))) as Arc<dyn WafProbe>
        });

        Self {
            transport,
            config,
            corpus: Arc::new(corpus),
            dom,
            waf,
        }
    }

    /// Replace the DOM analyzer (only used when DOM analysis is enabled)
    pub fn with_dom_analyzer(mut self, analyzer: DomAnalyzer) -> Self {
        if self.config.dom {
            self.dom = Some(Arc::new(analyzer));
        }
        self
    }

    /// Replace the WAF probe (only used when WAF bypass is enabled)
    pub fn with_waf_probe(mut self, probe: Arc<dyn WafProbe>) -> Self {
        if self.config.waf_bypass {
            self.waf = Some(probe);
        }
        self
    }

    /// Get scan configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Payloads in use
    pub fn corpus(&self) -> &PayloadCorpus {
        &self.corpus
    }

    /// Submit a login form once. Cookies it sets stay in the transport.
    ///
    /// `auth_data` is an `application/x-www-form-urlencoded` string such as
    /// `user=admin&pass=secret`. Status 200 or 302 counts as success.
    pub async fn authenticate(&self, auth_url: &str, auth_data: &str) -> Result<()> {
        let fields: Vec<(String, String)> = url::form_urlencoded::parse(auth_data.as_bytes())
            .into_owned()
            .collect();

        let response = self
            .transport
            .post_form(auth_url, &fields)
            .await
            .map_err(|e| Error::Authentication {
                reason: e.to_string(),
                url: Some(auth_url.to_string()),
                status: None,
            })?;

        match response.status_code() {
            200 | 302 => {
                info!("Authenticated against {}", auth_url);
                Ok(())
            }
            status => Err(Error::auth_rejected(auth_url, status)),
        }
    }

    /// Scan several targets one after another
    pub async fn scan_all(&self, urls: &[String]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for url in urls {
            findings.extend(self.scan_target(url).await);
        }
        findings
    }

    /// Scan one target. Never fails; problems are logged and yield fewer
    /// findings.
    pub async fn scan_target(&self, url: &str) -> Vec<Finding> {
        let span = info_span!("scan", target = %url);
        self.scan_target_inner(url).instrument(span).await
    }

    async fn scan_target_inner(&self, url: &str) -> Vec<Finding> {
        info!("Scanning target: {}", url);
        let started = Instant::now();

        let target = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                warn!("Skipping unparsable target {}: {}", url, e);
                return Vec::new();
            }
        };

        if let Some(ref waf) = self.waf {
            let verdict = waf.detect(url).await;
            if verdict.detected {
                warn!(
                    "WAF detected: {}",
                    verdict.label.as_deref().unwrap_or("unknown")
                );
            }
        }

        let baseline = match self.transport.get(url).await {
            Ok(r) => r.text_lossy(),
            Err(e) => {
                warn!("Failed to retrieve initial page {}: {}", url, e);
                return Vec::new();
            }
        };

        let params = extract_inputs(&target, &baseline);
        let sink = FindingSink::new();

        if params.is_empty() {
            info!("No parameters found to test in {}", url);
            sink.extend(self.fallback_probe(&target).await);
        } else {
            info!("Found {} parameters to test", params.len());
            self.run_matrix(&target, &params, &sink).await;
        }

        if let Some(ref dom) = self.dom {
            sink.extend(dom.scan_page(url, &baseline));
        }

        let findings = sink.take();
        info!(
            "Finished {} in {:.2}s: {} findings",
            url,
            started.elapsed().as_secs_f64(),
            findings.len()
        );
        findings
    }

    /// Try the first few payloads on a synthetic parameter
    async fn fallback_probe(&self, target: &Url) -> Vec<Finding> {
        let mut findings = Vec::new();

        for payload in self.corpus.head(FALLBACK_PAYLOADS) {
            let probe_url = set_query_param(target, FALLBACK_PARAMETER, payload);
            let body = match self.transport.get(probe_url.as_str()).await {
                Ok(r) => r.text_lossy(),
                Err(e) => {
                    debug!("Fallback probe failed for {}: {}", probe_url, e);
                    continue;
                }
            };

            if body.contains(payload.as_str()) {
                let finding = Finding::for_parameter(
                    FindingType::Reflected,
                    probe_url.as_str(),
                    FALLBACK_PARAMETER,
                    payload,
                    HttpMethod::Get,
                    extract_evidence(&body, payload),
                );
                info!("Found XSS vulnerability: {}", finding);
                findings.push(finding);
            }
        }

        findings
    }

    async fn run_matrix(&self, target: &Url, params: &ParameterMap, sink: &FindingSink) {
        let units = build_matrix(params, &self.corpus, self.config.methods, self.config.stored);
        debug!("Submitting {} test units", units.len());

        let ctx = Arc::new(UnitContext {
            transport: Arc::clone(&self.transport),
            dom: self.dom.clone(),
            target: target.clone(),
            delay: self.config.delay,
            stored_settle: self.config.stored_settle,
            encoding: self.config.encoding,
        });

        let mut pool = WorkerPool::new(self.config.threads);
        for unit in units {
            let ctx = Arc::clone(&ctx);
            pool.submit(async move { ctx.run(unit).await });
        }

        let mut failed = 0usize;
        let stats = pool
            .drain(|outcome| match outcome {
                UnitOutcome::Vulnerable(finding) => {
                    info!("Found XSS vulnerability: {}", finding);
                    sink.push(finding);
                }
                UnitOutcome::NotVulnerable => {}
                UnitOutcome::Failed(_) => failed += 1,
            })
            .await;

        debug!(
            "Matrix done: {} units, {} failed, peak concurrency {}",
            stats.completed, failed, stats.peak_concurrent
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;

    /// Echoes the `q` query/form value inside the page; `fail` makes every
    /// injected request error out.
    #[derive(Default)]
    struct EchoSite {
        page: String,
        fail_injections: bool,
        requests: Mutex<Vec<String>>,
        login_status: u16,
        echo_into_handler: bool,
    }

    impl EchoSite {
        fn html(body: String) -> Result<Response> {
            let mut headers = HeaderMap::new();
            headers.insert("content-type", HeaderValue::from_static("text/html"));
            Ok(Response::new(
                StatusCode::OK,
                headers,
                Bytes::from(body),
                Url::parse("http://a.test/")?,
                false,
                1,
            ))
        }
    }

    #[async_trait]
    impl Transport for EchoSite {
        async fn get(&self, url: &str) -> Result<Response> {
            self.requests.lock().push(format!("GET {}", url));
            let parsed = Url::parse(url)?;
            let echoed: Vec<String> = parsed
                .query_pairs()
                .filter(|(k, _)| k == "q" || k == FALLBACK_PARAMETER)
                .map(|(_, v)| v.into_owned())
                .collect();

            if echoed.is_empty() {
                return Self::html(self.page.clone());
            }
            if self.fail_injections {
                return Err(Error::timeout_with_url("GET", 10, url));
            }
            if self.echo_into_handler {
                let escaped = echoed
                    .join("")
                    .replace('&', "&amp;")
                    .replace('<', "&lt;")
                    .replace('>', "&gt;");
                return Self::html(format!(
                    r#"<img src=x onerror="eval(location.hash + '{}')">"#,
                    escaped
                ));
            }
            Self::html(format!("<p>{}</p>", echoed.join("")))
        }

        async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Response> {
            self.requests.lock().push(format!("POST {}", url));
            if url.ends_with("/login") {
                let mut response = Self::html(String::new())?;
                response.status = StatusCode::from_u16(self.login_status)
                    .map_err(|e| Error::other(e.to_string()))?;
                return Ok(response);
            }
            if self.fail_injections {
                return Err(Error::network("connection reset"));
            }
            Self::html(format!("<p>{}</p>", fields[0].1))
        }
    }

    fn corpus() -> PayloadCorpus {
        PayloadCorpus::from_payloads(["<script>alert(1)</script>", "<img src=x onerror=alert(1)>"])
    }

    fn config() -> ScanConfig {
        ScanConfig::new().delay(Duration::ZERO).stored_settle(Duration::ZERO)
    }

    #[test]
    fn test_matrix_completeness() {
        let url = Url::parse("http://a.test/?q=1&page=2").unwrap();
        let params = extract_inputs(&url, "<input name=email>");
        let corpus = corpus();

        assert_eq!(build_matrix(&params, &corpus, MethodSelection::All, false).len(), 3 * 2 * 2);
        assert_eq!(build_matrix(&params, &corpus, MethodSelection::Get, false).len(), 3 * 2);
        assert_eq!(build_matrix(&params, &corpus, MethodSelection::All, true).len(), 3 * 2 * 2 + 3 * 2);

        let units = build_matrix(&params, &corpus, MethodSelection::Post, true);
        assert_eq!(units[0].kind, UnitKind::Reflected(HttpMethod::Post));
        assert_eq!(units[1].kind, UnitKind::Stored);
        assert_eq!(units[0].parameter, "q");
    }

    #[test]
    fn test_method_selection_parse() {
        assert_eq!("GET".parse::<MethodSelection>().unwrap(), MethodSelection::Get);
        assert_eq!("all".parse::<MethodSelection>().unwrap().methods().len(), 2);
        assert!("put".parse::<MethodSelection>().is_err());
    }

    #[tokio::test]
    async fn test_reflected_get_and_post() {
        let site = Arc::new(EchoSite {
            page: "<form><input name=q></form>".to_string(),
            ..Default::default()
        });
        let injector = Injector::new(site.clone(), config(), corpus());

        let findings = injector.scan_target("http://a.test/search").await;

        assert_eq!(findings.len(), 4);
        assert!(findings.iter().all(|f| f.finding_type == FindingType::Reflected));
        assert!(findings.iter().all(|f| f.url == "http://a.test/search"));
        assert!(findings.iter().any(|f| f.method == HttpMethod::Post));
        let first = findings
            .iter()
            .find(|f| f.payload.as_deref() == Some("<script>alert(1)</script>"))
            .unwrap();
        assert_eq!(first.parameter.as_deref(), Some("q"));
        assert!(first.evidence.contains("**<script>alert(1)</script>**"));
    }

    #[tokio::test]
    async fn test_failed_units_do_not_abort() {
        let site = Arc::new(EchoSite {
            page: "<input name=q>".to_string(),
            fail_injections: true,
            ..Default::default()
        });
        let injector = Injector::new(site.clone(), config(), corpus());

        let findings = injector.scan_target("http://a.test/").await;

        assert!(findings.is_empty());
        // baseline + 2 payloads x 2 methods
        assert_eq!(site.requests.lock().len(), 5);
    }

    #[tokio::test]
    async fn test_fallback_probe() {
        let site = Arc::new(EchoSite {
            page: "<p>nothing to see</p>".to_string(),
            ..Default::default()
        });
        let corpus = PayloadCorpus::from_payloads(["p1", "p2", "p3", "p4", "p5", "p6", "p7"]);
        let injector = Injector::new(site.clone(), config(), corpus);

        let findings = injector.scan_target("http://a.test/static").await;

        assert_eq!(findings.len(), 5);
        assert_eq!(findings[0].url, "http://a.test/static?xss=p1");
        assert_eq!(findings[0].parameter.as_deref(), Some("xss"));
        assert_eq!(findings[0].method, HttpMethod::Get);
        assert_eq!(site.requests.lock().len(), 6);
    }

    #[tokio::test]
    async fn test_encoded_reflection() {
        let site = Arc::new(EchoSite {
            page: "<input name=q>".to_string(),
            ..Default::default()
        });
        let config = config()
            .methods(MethodSelection::Post)
            .encoding(PayloadEncoding::Base64);
        let corpus = PayloadCorpus::from_payloads(["<b>"]);
        let injector = Injector::new(site, config, corpus);

        let findings = injector.scan_target("http://a.test/").await;

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].encoded_payload.as_deref(), Some("PGI+"));
        assert_eq!(findings[0].payload.as_deref(), Some("<b>"));
        assert!(findings[0].evidence.contains("**PGI+**"));
    }

    #[tokio::test]
    async fn test_dom_sweep_only_when_enabled() {
        let page = "<input name=q><script>el.innerHTML = location.hash</script>".to_string();
        let site = Arc::new(EchoSite {
            page: page.clone(),
            fail_injections: true,
            ..Default::default()
        });

        let plain = Injector::new(site.clone(), config(), corpus());
        assert!(plain.scan_target("http://a.test/").await.is_empty());

        let dom = Injector::new(site, config().dom(true), corpus());
        let findings = dom.scan_target("http://a.test/").await;
        assert!(!findings.is_empty());
        assert!(findings
            .iter()
            .all(|f| f.finding_type == FindingType::Dom && f.parameter.is_none()));
    }

    #[tokio::test]
    async fn test_dom_finding_evidence_from_decoded_handler() {
        let site = Arc::new(EchoSite {
            page: "<input name=q>".to_string(),
            echo_into_handler: true,
            ..Default::default()
        });
        let config = config().methods(MethodSelection::Get).dom(true);
        let injector = Injector::new(site, config, PayloadCorpus::from_payloads(["<b>MARK</b>"]));

        let findings = injector.scan_target("http://a.test/app").await;

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, FindingType::Dom);
        assert!(findings[0].evidence.contains("**<b>MARK</b>**"));
        assert!(findings[0].evidence.contains("eval(location.hash"));
    }

    #[tokio::test]
    async fn test_baseline_failure_yields_nothing() {
        let site = Arc::new(EchoSite {
            fail_injections: true,
            ..Default::default()
        });
        let injector = Injector::new(site.clone(), config(), corpus());

        assert!(injector.scan_target("http://a.test/?q=x").await.is_empty());
        assert_eq!(site.requests.lock().len(), 1);
        assert!(injector.scan_target("::not a url::").await.is_empty());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let ok = Arc::new(EchoSite {
            login_status: 302,
            ..Default::default()
        });
        let injector = Injector::new(ok, config(), corpus());
        assert!(injector
            .authenticate("http://a.test/login", "user=admin&pass=s%26cret")
            .await
            .is_ok());

        let denied = Arc::new(EchoSite {
            login_status: 401,
            ..Default::default()
        });
        let injector = Injector::new(denied, config(), corpus());
        let err = injector
            .authenticate("http://a.test/login", "user=admin&pass=wrong")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication {
                status: Some(401),
                ..
            }
        ));
    }
}
