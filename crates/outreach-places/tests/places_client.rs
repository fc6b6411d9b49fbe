//! Integration tests for `PlacesClient` against a wiremock server.
//!
//! Covers text-search pagination, the details fetch, review fetch, quota
//! handling, and the partial-results contract when a later page fails.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use outreach_places::{PlacesClient, PlacesError};

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, "outreach-test/0.1", 0, 0, &server.uri())
        .expect("failed to build test PlacesClient")
        .with_page_token_delay_ms(0)
}

fn search_body(ids: &[&str], next: Option<&str>) -> serde_json::Value {
    let mut body = json!({
        "status": "OK",
        "results": ids.iter().map(|id| json!({"place_id": id})).collect::<Vec<_>>(),
    });
    if let Some(token) = next {
        body["next_page_token"] = json!(token);
    }
    body
}

fn details_body(id: &str, name: &str, website: Option<&str>) -> serde_json::Value {
    json!({
        "status": "OK",
        "result": {
            "place_id": id,
            "name": name,
            "formatted_address": "123 Main St, San Diego, CA",
            "formatted_phone_number": "(619) 555-0100",
            "website": website,
        }
    })
}

async fn mount_details(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("place_id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn find_businesses_returns_listings_from_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body(&["p1", "p2"], None)))
        .mount(&server)
        .await;
    mount_details(
        &server,
        "p1",
        details_body("p1", "Green Thumb Landscaping", Some("https://greenthumb.example.com")),
    )
    .await;
    mount_details(&server, "p2", details_body("p2", "Sunset Lawns", None)).await;

    let client = test_client(&server);
    let listings = client.find_businesses("landscaping in San Diego", 10).await.unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].listing_id, "p1");
    assert_eq!(listings[0].name, "Green Thumb Landscaping");
    assert_eq!(
        listings[0].website.as_deref(),
        Some("https://greenthumb.example.com")
    );
    assert!(listings[1].website.is_none());
}

#[tokio::test]
async fn find_businesses_respects_max_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&search_body(&["p1", "p2", "p3"], None)),
        )
        .mount(&server)
        .await;
    for id in ["p1", "p2", "p3"] {
        mount_details(&server, id, details_body(id, "Some Business", None)).await;
    }

    let client = test_client(&server);
    let listings = client.find_businesses("landscaping", 2).await.unwrap();
    assert_eq!(listings.len(), 2, "cap must stop detail fetching");
}

#[tokio::test]
async fn find_businesses_follows_next_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&search_body(&["p1"], Some("tok2"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param("pagetoken", "tok2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body(&["p2"], None)))
        .mount(&server)
        .await;
    mount_details(&server, "p1", details_body("p1", "First Page Inc", None)).await;
    mount_details(&server, "p2", details_body("p2", "Second Page Inc", None)).await;

    let client = test_client(&server);
    let listings = client.find_businesses("landscaping", 10).await.unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[1].name, "Second Page Inc");
}

#[tokio::test]
async fn nameless_listing_is_skipped_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&search_body(&["p1", "p2"], None)))
        .mount(&server)
        .await;
    mount_details(
        &server,
        "p1",
        json!({"status": "OK", "result": {"place_id": "p1"}}),
    )
    .await;
    mount_details(&server, "p2", details_body("p2", "Named Business", None)).await;

    let client = test_client(&server);
    let listings = client.find_businesses("landscaping", 10).await.unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].name, "Named Business");
}

#[tokio::test]
async fn quota_on_first_page_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"status": "OVER_QUERY_LIMIT"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.find_businesses("landscaping", 10).await;
    assert!(matches!(result, Err(PlacesError::QuotaExceeded)));
}

#[tokio::test]
async fn later_page_failure_returns_partial_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&search_body(&["p1"], Some("tok2"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .and(query_param("pagetoken", "tok2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"status": "OVER_QUERY_LIMIT"})),
        )
        .mount(&server)
        .await;
    mount_details(&server, "p1", details_body("p1", "Partial Result Co", None)).await;

    let client = test_client(&server);
    let listings = client.find_businesses("landscaping", 10).await.unwrap();
    assert_eq!(listings.len(), 1, "partial results are still usable");
}

#[tokio::test]
async fn zero_results_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let listings = client.find_businesses("landscaping on the moon", 10).await.unwrap();
    assert!(listings.is_empty());
}

#[tokio::test]
async fn fetch_reviews_returns_text_and_rating() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .and(query_param("fields", "reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "OK",
            "result": {
                "reviews": [
                    {"text": "They never called back after the estimate.", "rating": 1.0},
                    {"text": "Beautiful patio work!", "rating": 5.0},
                    {"text": "", "rating": 3.0},
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let reviews = client.fetch_reviews("p1").await.unwrap();
    assert_eq!(reviews.len(), 2, "empty review text is dropped");
    assert_eq!(reviews[0].rating, Some(1.0));
}

#[tokio::test]
async fn fetch_reviews_empty_when_listing_has_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"status": "OK", "result": {}})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let reviews = client.fetch_reviews("p1").await.unwrap();
    assert!(reviews.is_empty());
}
