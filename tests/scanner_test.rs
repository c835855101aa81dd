// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end tests against wiremock servers through the real HTTP client

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};
use xss_hunter::{
    CrawlConfig, Crawler, Error, FindingType, HttpClient, HttpMethod, Injector, MethodSelection,
    PayloadCorpus, Report, ReportFormat, ScanConfig, Transport,
};

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

fn client() -> Arc<HttpClient> {
    Arc::new(HttpClient::new().unwrap())
}

fn quiet_config() -> ScanConfig {
    ScanConfig::new()
        .delay(Duration::ZERO)
        .stored_settle(Duration::ZERO)
}

fn form_value(req: &Request, name: &str) -> Option<String> {
    url::form_urlencoded::parse(&req.body)
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

fn query_value(req: &Request, name: &str) -> Option<String> {
    req.url
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_crawl_stays_on_site() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><body>
                <a href="/about">About</a>
                <a href="http://other.test/x">Elsewhere</a>
                <a href="/logo.png">Logo</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<p>about us</p>"))
        .mount(&server)
        .await;

    let crawler = Crawler::new(
        client(),
        CrawlConfig::new().max_depth(1).delay(Duration::ZERO),
    );
    let found = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(found, vec![server.uri(), format!("{}/about", server.uri())]);
}

#[tokio::test]
async fn test_crawl_skips_non_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/feed">feed</a>"#))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="/hidden">x</a>"#, "application/json"),
        )
        .mount(&server)
        .await;

    let crawler = Crawler::new(client(), CrawlConfig::new().delay(Duration::ZERO));
    let (found, stats) = crawler.crawl_with_stats(&server.uri()).await.unwrap();

    assert_eq!(found.len(), 2);
    assert!(!found.iter().any(|u| u.ends_with("/hidden")));
    assert_eq!(stats.non_html, 1);
}

#[tokio::test]
async fn test_reflected_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(|req: &Request| match query_value(req, "q") {
            Some(q) => html(format!("<h1>Results for {}</h1>", q)),
            None => html(r#"<form action="/search"><input name="q"></form>"#),
        })
        .mount(&server)
        .await;

    let corpus = PayloadCorpus::from_payloads(["<script>alert(1)</script>"]);
    let config = quiet_config().methods(MethodSelection::Get);
    let injector = Injector::new(client(), config, corpus);

    let target = format!("{}/search", server.uri());
    let findings = injector.scan_target(&target).await;

    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.finding_type, FindingType::Reflected);
    assert_eq!(finding.parameter.as_deref(), Some("q"));
    assert_eq!(finding.payload.as_deref(), Some("<script>alert(1)</script>"));
    assert_eq!(finding.method, HttpMethod::Get);
    assert_eq!(finding.url, target);
    assert!(finding.evidence.contains("**<script>alert(1)</script>**"));
}

#[tokio::test]
async fn test_escaped_output_is_not_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/safe"))
        .respond_with(|req: &Request| match query_value(req, "q") {
            Some(q) => html(format!("<p>{}</p>", q.replace('<', "&lt;").replace('>', "&gt;"))),
            None => html(r#"<input name="q">"#),
        })
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/safe"))
        .respond_with(html("<p>nothing</p>"))
        .mount(&server)
        .await;

    let corpus = PayloadCorpus::from_payloads(["<script>alert(1)</script>", "<b onmouseover=x>"]);
    let injector = Injector::new(client(), quiet_config(), corpus);

    let findings = injector
        .scan_target(&format!("{}/safe", server.uri()))
        .await;
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_stored_guestbook() {
    let server = MockServer::start().await;
    let entries: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let book = Arc::clone(&entries);
    Mock::given(method("GET"))
        .and(path("/book"))
        .respond_with(move |_req: &Request| {
            html(format!(
                r#"<form method="post"><input name="comment"></form><ul>{}</ul>"#,
                book.lock().join("")
            ))
        })
        .mount(&server)
        .await;

    let book = Arc::clone(&entries);
    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(move |req: &Request| {
            if let Some(comment) = form_value(req, "comment") {
                book.lock().push(format!("<li>{}</li>", comment));
            }
            html("<p>Thanks for signing!</p>")
        })
        .mount(&server)
        .await;

    let corpus = PayloadCorpus::from_payloads(["<svg onload=alert(7)>"]);
    let config = quiet_config()
        .methods(MethodSelection::Post)
        .stored(true)
        .threads(1);
    let injector = Injector::new(client(), config, corpus);

    let findings = injector
        .scan_target(&format!("{}/book", server.uri()))
        .await;

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].finding_type, FindingType::Stored);
    assert_eq!(findings[0].method, HttpMethod::Post);
    assert_eq!(findings[0].parameter.as_deref(), Some("comment"));
    assert!(findings[0].evidence.contains("**<svg onload=alert(7)>**"));
}

#[tokio::test]
async fn test_dom_flow_on_baseline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app"))
        .respond_with(html(
            "<html><body><script>document.write(location.hash)</script></body></html>",
        ))
        .mount(&server)
        .await;

    let corpus = PayloadCorpus::from_payloads(["MARK-1"]);
    let injector = Injector::new(client(), quiet_config().dom(true), corpus);

    let findings = injector
        .scan_target(&format!("{}/app", server.uri()))
        .await;

    let dom: Vec<_> = findings
        .iter()
        .filter(|f| f.finding_type == FindingType::Dom)
        .collect();
    assert!(!dom.is_empty());
    assert!(dom
        .iter()
        .any(|f| f.source.as_deref() == Some("location.hash")
            && f.sink.as_deref() == Some("document.write(")));
}

#[tokio::test]
async fn test_unreachable_target_yields_nothing() {
    let injector = Injector::new(client(), quiet_config(), PayloadCorpus::build(false, false, false));
    let findings = injector.scan_target("http://127.0.0.1:1/").await;
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_form_login_sets_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(|req: &Request| {
            if form_value(req, "pass").as_deref() == Some("s3cret") {
                html("welcome").insert_header("set-cookie", "session=abc123; Path=/")
            } else {
                ResponseTemplate::new(401)
            }
        })
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("cookie", "session=abc123"))
        .respond_with(html("<p>members area</p>"))
        .mount(&server)
        .await;

    let client = client();
    let injector = Injector::new(client.clone(), quiet_config(), PayloadCorpus::from_payloads(["x"]));
    let login = format!("{}/login", server.uri());

    let err = injector.authenticate(&login, "user=admin&pass=wrong").await.unwrap_err();
    assert!(matches!(err, Error::Authentication { status: Some(401), .. }));

    injector.authenticate(&login, "user=admin&pass=s3cret").await.unwrap();
    assert_eq!(client.cookie_jar().len(), 1);

    let page = client
        .get(&format!("{}/private", server.uri()))
        .await
        .unwrap();
    assert_eq!(page.status_code(), 200);
}

#[tokio::test]
async fn test_login_redirect_keeps_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/dashboard")
                .insert_header("set-cookie", "sid=xyz; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .and(header("cookie", "sid=xyz"))
        .respond_with(html("<p>hello admin</p>"))
        .mount(&server)
        .await;

    let client = client();
    let injector = Injector::new(client.clone(), quiet_config(), PayloadCorpus::from_payloads(["x"]));
    injector
        .authenticate(&format!("{}/login", server.uri()), "user=admin&pass=pw")
        .await
        .unwrap();

    assert_eq!(client.cookie_jar().len(), 1);

    let page = client
        .post_form(&format!("{}/login", server.uri()), &[])
        .await
        .unwrap();
    assert!(page.redirected);
    assert_eq!(page.url.path(), "/dashboard");
    assert!(page.text_lossy().contains("hello admin"));
}

#[tokio::test]
async fn test_scan_to_reports() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .respond_with(|req: &Request| {
            html(format!("<div>{}</div>", form_value(req, "msg").unwrap_or_default()))
        })
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/echo"))
        .respond_with(html(r#"<form method="post"><input name="msg"></form>"#))
        .mount(&server)
        .await;

    let corpus = PayloadCorpus::from_payloads(["<img src=x onerror=alert(1)>"]);
    let injector = Injector::new(client(), quiet_config().methods(MethodSelection::Post), corpus);
    let findings = injector
        .scan_target(&format!("{}/echo", server.uri()))
        .await;
    assert_eq!(findings.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("report");
    let paths = Report::new(findings)
        .write(base.to_str().unwrap(), ReportFormat::All)
        .unwrap();
    assert_eq!(paths.len(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths[1]).unwrap()).unwrap();
    assert_eq!(json["total_vulnerabilities"], 1);
    assert_eq!(json["vulnerabilities"][0]["method"], "POST");

    let page = std::fs::read_to_string(&paths[2]).unwrap();
    assert!(!page.contains("<img src=x onerror=alert(1)>"));
    assert!(page.contains("&lt;img src=x onerror=alert(1)&gt;"));
}
