//! End-to-end tests over the assembled router with a scripted upstream.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Days, Utc};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use workspace_quota::application::fetcher::QuotaFetcher;
use workspace_quota::config::Config;
use workspace_quota::infrastructure::mock::MockUsageReportService;
use workspace_quota::infrastructure::observability::QuotaMetrics;
use workspace_quota::interfaces::server::{AppState, build_router};

fn test_config(stats_token: &str, metrics_token: &str) -> Config {
    Config {
        credentials_file: "credentials.json".into(),
        token_file: "token.json".into(),
        port: 0,
        stats_token: stats_token.to_string(),
        metrics_token: metrics_token.to_string(),
    }
}

fn app_over(
    mock: Arc<MockUsageReportService>,
    stats_token: &str,
    metrics_token: &str,
) -> Router {
    let fetcher = Arc::new(QuotaFetcher::new(mock));
    let metrics = QuotaMetrics::new(fetcher.clone()).expect("Failed to create metrics");
    build_router(
        &test_config(stats_token, metrics_token),
        AppState { fetcher, metrics },
    )
}

fn healthy_mock() -> Arc<MockUsageReportService> {
    let yesterday = Utc::now().date_naive() - Days::new(1);
    Arc::new(MockUsageReportService::new().with_report(yesterday, 1_048_576, 524_288))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn test_gated_stats_rejects_missing_and_wrong_token() {
    let mock = healthy_mock();

    for uri in ["/", "/?token=wrong", "/?token="] {
        let (status, _) = get(app_over(mock.clone(), "s3cret", ""), uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "uri {uri}");
    }

    // The gate short-circuits before any fetch happens.
    assert!(mock.calls().await.is_empty());
}

#[tokio::test]
async fn test_gated_stats_accepts_the_exact_token() {
    let (status, body) = get(app_over(healthy_mock(), "s3cret", ""), "/?token=s3cret").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("1.000"));
    assert!(body.contains("0.500"));
}

#[tokio::test]
async fn test_empty_secret_leaves_the_endpoint_open() {
    let (status, _) = get(app_over(healthy_mock(), "", ""), "/").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(app_over(healthy_mock(), "", ""), "/?token=anything").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_endpoint_secrets_are_independent() {
    let mock = healthy_mock();

    // The metrics secret does not open the stats page.
    let (status, _) = get(app_over(mock.clone(), "page", "scrape"), "/?token=scrape").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(
        app_over(mock.clone(), "page", "scrape"),
        "/metrics?token=scrape",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stats_failure_hides_upstream_detail() {
    let mock = Arc::new(MockUsageReportService::new());
    let (status, body) = get(app_over(mock, "", ""), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to fetch quota stats");
    assert!(!body.contains("no report published"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_metrics_scrape_reports_quota_in_bytes() {
    let (status, body) = get(app_over(healthy_mock(), "", ""), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("workspace_quota_total_bytes 1099511627776"));
    assert!(body.contains("workspace_quota_used_bytes 549755813888"));
    assert!(body.contains("workspace_quota_scrape_errors_total 0"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_metrics_scrape_survives_upstream_failure() {
    let mock = Arc::new(MockUsageReportService::new());
    let (status, body) = get(app_over(mock.clone(), "", ""), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
    assert!(body.contains("workspace_quota_scrape_errors_total 1"));

    // All five candidate dates were probed before giving up.
    assert_eq!(mock.calls().await.len(), 5);
}
