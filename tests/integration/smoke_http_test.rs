// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{healthy_site, mount_page, mount_redirect, HEALTHY_HOMEPAGE};
use chrono::Utc;
use otka_verify::application::use_cases::smoke_suite::SmokeSuite;
use otka_verify::domain::models::test_report::TestReport;
use otka_verify::engines::http_probe::HttpProbe;
use otka_verify::engines::traits::{PageFetcher, Redirects};
use otka_verify::infrastructure::storage::LocalReportStorage;
use std::sync::Arc;
use wiremock::MockServer;

fn suite_for(base_url: &str) -> SmokeSuite<HttpProbe> {
    SmokeSuite::new(Arc::new(HttpProbe::new(base_url, None).unwrap()))
}

#[tokio::test]
async fn test_healthy_site_passes_every_check() {
    let server = healthy_site().await;

    let run = suite_for(&server.uri()).run_all().await;

    assert_eq!(run.total(), 13);
    assert!(run.all_passed(), "{:#?}", run.results());
    assert_eq!(run.results()[0].test, "Homepage Load with SEO");
    assert_eq!(run.success_rate(), 1.0);
}

#[tokio::test]
async fn test_manual_redirects_expose_location() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/admin", 302, "/login").await;
    let probe = HttpProbe::new(&server.uri(), None).unwrap();

    let response = probe.fetch("/admin", Redirects::Manual).await.unwrap();

    assert_eq!(response.status, 302);
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_protected_route_scenario_admin_redirect() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/admin", 302, "/login").await;
    mount_page(&server, "/parteneri/dashboard", 200, "<h1>Dashboard</h1>").await;

    let suite = suite_for(&server.uri());
    let mut run = otka_verify::domain::models::test_result::TestRun::new();
    suite.check_protected_routes(&mut run).await;

    assert_eq!(run.total(), 2);
    assert_eq!(run.results()[0].test, "Protected Route /admin");
    assert!(run.results()[0].success);
    assert_eq!(run.results()[0].details, "Redirects to login: /login");
    assert_eq!(run.results()[1].test, "Protected Route /parteneri/dashboard");
    assert!(!run.results()[1].success);
}

#[tokio::test]
async fn test_partner_page_redirected_to_login_fails() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/parteneri", 307, "/login").await;
    mount_page(&server, "/login", 200, "Parteneri OTKA - autentificare").await;

    let suite = suite_for(&server.uri());
    let mut run = otka_verify::domain::models::test_result::TestRun::new();
    suite.check_partner_page(&mut run).await;

    let result = &run.results()[0];
    assert!(!result.success);
    assert_eq!(
        result.details,
        "Content check failed - Has content: true, Not redirected: false"
    );
}

#[tokio::test]
async fn test_broken_build_and_missing_pages_fail() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        500,
        &format!("{}<pre>Failed to compile</pre>", HEALTHY_HOMEPAGE),
    )
    .await;

    let run = suite_for(&server.uri()).run_all().await;

    let homepage = &run.results()[0];
    assert_eq!(homepage.test, "Homepage Load");
    assert_eq!(homepage.expected_status, Some(200));
    assert_eq!(homepage.actual_status, Some(500));

    let build_root = run
        .results()
        .iter()
        .find(|r| r.test == "Build Check /")
        .unwrap();
    assert!(!build_root.success);

    // Unmounted routes answer 404, which is not an auth rejection
    let api = run
        .results()
        .iter()
        .find(|r| r.test == "CSV Export API Protection")
        .unwrap();
    assert!(!api.success);
    assert_eq!(api.details, "Unexpected status: 404");
}

#[tokio::test]
async fn test_unreachable_server_records_every_check_as_failed() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let run = suite_for(&format!("http://127.0.0.1:{}", port)).run_all().await;

    assert_eq!(run.total(), 13);
    assert_eq!(run.passed(), 0);
    assert!(run.results().iter().all(|r| !r.details.is_empty()));
    assert!(!run.all_passed());
}

#[tokio::test]
async fn test_report_written_after_run() {
    let server = healthy_site().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backend_results.json");

    let run = suite_for(&server.uri()).run_all().await;
    let report = TestReport::from_run(&run, Utc::now());
    LocalReportStorage::new(&path).save(&report).await.unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["total_tests"], 13);
    assert_eq!(saved["passed_tests"], 13);
    assert_eq!(saved["success_rate"], 1.0);
    assert_eq!(saved["results"].as_array().unwrap().len(), 13);
}
