//! Content pages that were never written come back as empty successes.

use httpmock::MockServer;
use mealdesk::application::resources::{GetContent, SaveContent};
use mealdesk::cache::{CacheConfig, QueryStatus, ResourceCache};
use mealdesk::infra::auth::TokenStore;
use mealdesk::infra::rest::{ApiClient, ApiError};
use mealdesk_api_types::content::{ContentPageDraft, ContentSlug};
use serde_json::json;

fn cache(server: &MockServer) -> ResourceCache {
    let client =
        ApiClient::with_base(&server.base_url(), TokenStore::with_token("t")).expect("client");
    ResourceCache::new(client, CacheConfig::default())
}

#[tokio::test]
async fn http_404_becomes_empty_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/privacy-policy");
        then.status(404)
            .header("content-type", "application/json")
            .body(json!({ "success": false, "message": "Privacy policy not found" }).to_string());
    });
    let cache = cache(&server);

    let state = cache.query(GetContent::new(ContentSlug::PrivacyPolicy)).await;
    assert_eq!(state.status, QueryStatus::Success);
    assert!(state.data().is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn nested_status_code_is_recognised() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/about-us");
        then.status(400)
            .header("content-type", "application/json")
            .body(json!({ "data": { "statusCode": 404 } }).to_string());
    });
    let cache = cache(&server);

    let state = cache.query(GetContent::new(ContentSlug::AboutUs)).await;
    assert!(state.is_success());
    assert!(state.data().is_none());
}

#[tokio::test]
async fn strict_reads_keep_the_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/refund-policy");
        then.status(404);
    });
    let cache = cache(&server);

    let state = cache.query(GetContent::strict(ContentSlug::RefundPolicy)).await;
    assert!(state.is_error());
    assert!(state.error.as_ref().is_some_and(ApiError::is_not_found));
}

#[tokio::test]
async fn other_failures_stay_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/terms-and-conditions");
        then.status(500)
            .header("content-type", "application/json")
            .body(json!({ "message": "boom" }).to_string());
    });
    let cache = cache(&server);

    let state = cache
        .query(GetContent::new(ContentSlug::TermsAndConditions))
        .await;
    assert!(state.is_error());
    assert_eq!(state.error.map(|e| e.user_message()), Some("boom".into()));
}

#[tokio::test]
async fn saving_a_page_refreshes_its_subscription() {
    let server = MockServer::start();
    let mut missing = server.mock(|when, then| {
        when.method("GET").path("/about-us");
        then.status(404);
    });
    let cache = cache(&server);

    let mut page = cache.subscribe(GetContent::new(ContentSlug::AboutUs));
    let first = page.settled().await.expect("entry alive");
    assert!(first.is_success() && first.data().is_none());

    missing.delete();
    server.mock(|when, then| {
        when.method("GET").path("/about-us");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({ "success": true, "data": { "title": "About", "content": "We cook." } }).to_string());
    });
    server.mock(|when, then| {
        when.method("POST").path("/about-us");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({ "success": true, "message": "Saved" }).to_string());
    });

    let saved = cache
        .mutate(SaveContent::new(
            ContentSlug::AboutUs,
            ContentPageDraft {
                title: Some("About".into()),
                content: "We cook.".into(),
            },
        ))
        .await
        .expect("saved");
    assert!(saved.data.is_none());

    let refreshed = page
        .wait_for(|state| state.data().is_some())
        .await
        .expect("entry alive");
    assert_eq!(
        refreshed.data().map(|p| p.content.as_str()),
        Some("We cook.")
    );
}
