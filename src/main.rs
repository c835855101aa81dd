// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! xss-hunter CLI
//!
//! Exit codes: 0 no findings, 2 findings reported, 1 fatal setup error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use xss_hunter::config::{load_targets, validate_target};
use xss_hunter::http::{parse_cookie_list, parse_credentials, parse_header_list};
use xss_hunter::{
    Crawler, Error, Finding, HttpClient, Injector, PayloadCorpus, Report, Settings, Transport,
};

/// XSS discovery and injection scanner
#[derive(Parser, Debug)]
#[command(name = "xss-hunter", version, about)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "list"])))]
struct Cli {
    /// Target URL
    #[arg(short, long)]
    url: Option<String>,

    /// File with one target URL per line
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// Crawl each target before scanning
    #[arg(short, long)]
    crawl: bool,

    /// Crawl depth (default: 2)
    #[arg(long)]
    depth: Option<u32>,

    /// Regex of URLs the crawler must not follow
    #[arg(long)]
    exclude: Option<String>,

    /// Request methods to test
    #[arg(short, long, value_parser = ["get", "post", "all"])]
    method: Option<String>,

    /// Analyze client-side script for DOM-based XSS
    #[arg(long)]
    dom: bool,

    /// Probe for stored XSS
    #[arg(long)]
    stored: bool,

    /// Fingerprint WAFs and add bypass payloads
    #[arg(long)]
    waf: bool,

    /// Add polyglot payloads
    #[arg(long)]
    polyglot: bool,

    /// Accepted for compatibility, has no effect
    #[arg(long, hide = true)]
    blind: bool,

    /// Request timeout in seconds (default: 10)
    #[arg(long)]
    timeout: Option<u64>,

    /// Delay before each request in seconds (default: 0.1)
    #[arg(long)]
    delay: Option<f64>,

    /// Custom User-Agent string
    #[arg(long)]
    user_agent: Option<String>,

    /// Concurrent test units (default: 5)
    #[arg(long)]
    threads: Option<usize>,

    /// Cookies: "name1=value1; name2=value2"
    #[arg(long)]
    cookie: Option<String>,

    /// Extra headers: "Header1: value1; Header2: value2"
    #[arg(long)]
    headers: Option<String>,

    /// Basic auth credentials: "user:pass"
    #[arg(long)]
    auth_basic: Option<String>,

    /// Log in through a form before scanning
    #[arg(long, requires_all = ["auth_url", "auth_data"])]
    auth_form: bool,

    /// Login form URL
    #[arg(long)]
    auth_url: Option<String>,

    /// Login POST data: "key1=value1&key2=value2"
    #[arg(long)]
    auth_data: Option<String>,

    /// Proxy URL: "http://host:port"
    #[arg(long)]
    proxy: Option<String>,

    /// Proxy credentials: "user:pass"
    #[arg(long)]
    proxy_auth: Option<String>,

    /// Base filename for reports
    #[arg(short, long)]
    output: Option<String>,

    /// Report format
    #[arg(long, value_parser = ["txt", "json", "html", "all"])]
    format: Option<String>,

    /// Payload encoding: none, url, double_url, html, base64, hex, unicode, octal
    #[arg(long)]
    encoding: Option<String>,

    /// Extra payload file, one payload per line
    #[arg(long)]
    payloads: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file (default: ./xss_hunter.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xss_hunter={}", level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Fold command line values into the loaded settings
fn apply_overrides(settings: &mut Settings, cli: &Cli) -> anyhow::Result<()> {
    let scanner = &mut settings.scanner;
    if let Some(timeout) = cli.timeout {
        scanner.timeout = timeout;
    }
    if let Some(delay) = cli.delay {
        scanner.delay = delay;
    }
    if let Some(threads) = cli.threads {
        scanner.threads = threads;
    }
    if let Some(ref ua) = cli.user_agent {
        scanner.user_agent = Some(ua.clone());
    }
    if let Some(ref method) = cli.method {
        scanner.methods = method.clone();
    }
    if let Some(ref encoding) = cli.encoding {
        scanner.encoding = encoding.parse()?;
    }
    if let Some(ref payloads) = cli.payloads {
        scanner.payloads = Some(payloads.clone());
    }
    scanner.dom |= cli.dom;
    scanner.stored |= cli.stored;
    scanner.waf_bypass |= cli.waf;
    scanner.polyglot |= cli.polyglot;
    scanner.blind |= cli.blind;

    let crawler = &mut settings.crawler;
    crawler.enabled |= cli.crawl;
    if let Some(depth) = cli.depth {
        crawler.depth = depth;
    }
    if let Some(ref exclude) = cli.exclude {
        crawler.exclude = Some(exclude.clone());
    }

    if let Some(ref output) = cli.output {
        settings.reporting.output = Some(output.clone());
    }
    if let Some(ref format) = cli.format {
        settings.reporting.format = format.clone();
    }

    if let Some(ref proxy) = cli.proxy {
        settings.proxy.url = Some(proxy.clone());
    }
    if let Some(ref auth) = cli.proxy_auth {
        settings.proxy.auth = Some(auth.clone());
    }

    Ok(())
}

fn build_client(settings: &Settings, cli: &Cli) -> anyhow::Result<HttpClient> {
    let mut config = settings.http_config();

    if let Some(ref raw) = cli.headers {
        for (name, value) in parse_header_list(raw) {
            config = config.header(name, value);
        }
    }
    if let Some(ref raw) = cli.cookie {
        for (name, value) in parse_cookie_list(raw) {
            config = config.cookie(name, value);
        }
    }
    if let Some(ref raw) = cli.auth_basic {
        let (user, pass) = parse_credentials(raw)
            .ok_or_else(|| Error::config("--auth-basic expects user:pass"))?;
        config = config.basic_auth(user, pass);
    }

    HttpClient::with_config(config).context("Failed to build HTTP client")
}

fn build_corpus(settings: &Settings) -> anyhow::Result<PayloadCorpus> {
    let scanner = &settings.scanner;
    let mut corpus = PayloadCorpus::build(scanner.dom, scanner.waf_bypass, scanner.polyglot);

    if let Some(ref path) = scanner.payloads {
        let added = corpus
            .extend_from_file(path)
            .with_context(|| format!("Failed to load payloads from {}", path.display()))?;
        info!("Loaded {} custom payloads", added);
    }
    if scanner.blind {
        info!("Blind XSS payloads are not supported; --blind has no effect");
    }

    Ok(corpus)
}

fn collect_targets(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if let Some(ref url) = cli.url {
        return Ok(vec![validate_target(url)?]);
    }
    if let Some(ref list) = cli.list {
        return load_targets(list)
            .with_context(|| format!("Failed to load targets from {}", list.display()));
    }
    bail!("no target given; use --url or --list")
}

async fn expand_by_crawling(
    settings: &Settings,
    transport: Arc<dyn Transport>,
    targets: Vec<String>,
) -> anyhow::Result<Vec<String>> {
    let crawler = Crawler::new(transport, settings.crawl_config()?);
    let mut urls: Vec<String> = Vec::new();

    for target in &targets {
        info!("Crawling {}", target);
        let (found, stats) = crawler.crawl_with_stats(target).await?;
        info!(
            "Discovered {} URLs ({} fetched, {} failed)",
            found.len(),
            stats.pages_fetched,
            stats.fetch_failures
        );
        for url in found {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }

    Ok(urls)
}

async fn run(cli: Cli) -> anyhow::Result<usize> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut settings, &cli)?;

    let targets = collect_targets(&cli)?;
    let client = Arc::new(build_client(&settings, &cli)?);
    let corpus = build_corpus(&settings)?;
    let report_format = settings.report_format();

    let injector = Injector::new(client.clone(), settings.scan_config()?, corpus);

    if cli.auth_form {
        let (auth_url, auth_data) = match (&cli.auth_url, &cli.auth_data) {
            (Some(u), Some(d)) => (u, d),
            _ => bail!("--auth-form requires --auth-url and --auth-data"),
        };
        injector.authenticate(auth_url, auth_data).await?;
    }

    let started = Instant::now();

    let urls = if settings.crawler.enabled {
        expand_by_crawling(&settings, client.clone(), targets).await?
    } else {
        targets
    };
    info!(
        "Scanning {} URLs with {} payloads",
        urls.len(),
        injector.corpus().len()
    );

    let findings: Vec<Finding> = injector.scan_all(&urls).await;

    info!("Scan completed in {:.2} seconds", started.elapsed().as_secs_f64());
    info!("Found {} vulnerabilities", findings.len());
    for finding in &findings {
        println!("{}", finding);
    }

    if let Some(ref base) = settings.reporting.output {
        // A bad format or unwritable file loses the report, not the run
        match report_format {
            Ok(format) => {
                if let Err(e) = Report::new(findings.clone()).write(base, format) {
                    error!("Error generating report: {}", e);
                }
            }
            Err(e) => warn!("{}", e),
        }
    }

    Ok(findings.len())
}
