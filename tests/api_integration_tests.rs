//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles through the router, with the memory
//! cache backend in front of a seeded store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use customer_cache::{
    api::create_router,
    cache::{CacheAside, MemoryBackend},
    store::MemoryStore,
    AppState, CustomerService, TtlPolicy,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let service = CustomerService::new(
        Arc::new(MemoryStore::seeded()),
        CacheAside::new(Arc::new(MemoryBackend::new("Customers_"))),
        TtlPolicy::default(),
    );
    create_router(AppState::new(service))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn country_id(app: &Router, name: &str) -> String {
    let (_, countries) = send(app, "GET", "/api/customers/address/countries/all", None).await;
    countries
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .map(|c| c["id"].as_str().unwrap().to_string())
        .unwrap()
}

fn address_body(street1: &str, country_id: &str) -> Value {
    json!({
        "street1": street1,
        "dependentLocality": "Jackson",
        "locale": "WY",
        "postalCode": "83001",
        "countryId": country_id,
    })
}

fn customer_body(last_name: &str, country_id: &str) -> Value {
    json!({
        "firstName": "Tommy",
        "lastName": last_name,
        "email": "tommy@testmail.com",
        "primaryPhone": "3155550100",
        "billingAddress": address_body("1 Dam Road", country_id),
    })
}

async fn stats(app: &Router) -> Value {
    send(app, "GET", "/stats", None).await.1
}

fn ids(page: &Value) -> Vec<String> {
    page["customers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

// == Customer Endpoint Tests ==

#[tokio::test]
async fn test_list_customers_default_page() {
    let app = create_test_app();

    let (status, page) = send(&app, "GET", "/api/customers", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pageSize"], 50);
    assert_eq!(page["totalCount"], 50);
    assert_eq!(page["customers"][0]["lastName"], "Miller");
}

#[tokio::test]
async fn test_list_customers_served_from_cache() {
    let app = create_test_app();

    send(&app, "GET", "/api/customers?pageSize=10&currentNumber=0", None).await;
    send(&app, "GET", "/api/customers?pageSize=10&currentNumber=0", None).await;

    let json = stats(&app).await;
    assert_eq!(json["backend"], "memory");
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["fills"], 1);
}

#[tokio::test]
async fn test_create_then_delete_customer_reflected_in_list() {
    let app = create_test_app();
    let us = country_id(&app, "United States").await;

    let (_, before) = send(&app, "GET", "/api/customers", None).await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/customers",
        Some(customer_body("Aaronson", &us)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let x = created["id"].as_str().unwrap().to_string();

    let (_, after_create) = send(&app, "GET", "/api/customers", None).await;
    assert!(!ids(&before).contains(&x));
    assert!(ids(&after_create).contains(&x));

    let (status, _) = send(&app, "DELETE", &format!("/api/customers/{}", x), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after_delete) = send(&app, "GET", "/api/customers", None).await;
    assert!(!ids(&after_delete).contains(&x));

    let (status, _) = send(&app, "GET", &format!("/api/customers/{}", x), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Every list read after a write missed
    assert_eq!(stats(&app).await["hits"], 0);
}

#[tokio::test]
async fn test_create_customer_validation() {
    let app = create_test_app();
    let us = country_id(&app, "United States").await;

    let mut body = customer_body("Aaronson", &us);
    body["firstName"] = json!("");
    let (status, json) = send(&app, "POST", "/api/customers", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "firstName is required");

    let unknown_country = uuid::Uuid::new_v4().to_string();
    let body = customer_body("Aaronson", &unknown_country);
    let (status, json) = send(&app, "POST", "/api/customers", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_list_rejects_page_size_out_of_range() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/api/customers?pageSize=0", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_delete_unknown_customer() {
    let app = create_test_app();
    let uri = format!("/api/customers/{}", uuid::Uuid::new_v4());

    let (status, json) = send(&app, "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

// == Shipping Address Endpoint Tests ==

#[tokio::test]
async fn test_shipping_address_lifecycle() {
    let app = create_test_app();
    let ca = country_id(&app, "Canada").await;

    let (_, page) = send(&app, "GET", "/api/customers", None).await;
    let customer = &page["customers"][0];
    let customer_id = customer["id"].as_str().unwrap();
    let billing_id = customer["billingAddressId"].as_str().unwrap();
    let uri = format!("/api/customers/{}/address", customer_id);

    let (status, listed) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["shippingAddresses"].as_array().unwrap().len(), 1);

    let (status, added) = send(&app, "POST", &uri, Some(address_body("9 Elk Lane", &ca))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["country"], "Canada");
    let added_id = added["id"].as_str().unwrap();

    let (_, listed) = send(&app, "GET", &uri, None).await;
    assert_eq!(listed["shippingAddresses"].as_array().unwrap().len(), 2);

    // The billing address cannot be removed while the customer uses it
    let (status, json) = send(&app, "DELETE", &format!("{}/{}", uri, billing_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["error"],
        "Cannot delete current billing address while it is still active."
    );

    let (status, _) = send(&app, "DELETE", &format!("{}/{}", uri, added_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", &uri, None).await;
    assert_eq!(listed["shippingAddresses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_shipping_addresses_for_unknown_customer() {
    let app = create_test_app();
    let uri = format!("/api/customers/{}/address", uuid::Uuid::new_v4());

    let (status, json) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No addresses exist for the given customer");
}

// == Country Endpoint Tests ==

#[tokio::test]
async fn test_country_create_and_delete() {
    let app = create_test_app();
    let list_uri = "/api/customers/address/countries/all";

    let (status, before) = send(&app, "GET", list_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let count = before.as_array().unwrap().len();

    let (status, created) = send(
        &app,
        "POST",
        "/api/customers/address/countries",
        Some(json!({ "name": "Iceland" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap();

    let (_, after) = send(&app, "GET", list_uri, None).await;
    assert_eq!(after.as_array().unwrap().len(), count + 1);

    let uri = format!("/api/customers/address/countries/{}", id);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, last) = send(&app, "GET", list_uri, None).await;
    assert_eq!(last.as_array().unwrap().len(), count);
}

#[tokio::test]
async fn test_delete_country_in_use() {
    let app = create_test_app();
    let us = country_id(&app, "United States").await;

    let uri = format!("/api/customers/address/countries/{}", us);
    let (status, json) = send(&app, "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json.get("error").is_some());
}

// == STATS / HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_initial() {
    let app = create_test_app();

    let json = stats(&app).await;

    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["invalidated"], 0);
    assert!(json.get("hit_rate").is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/customers")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 422 for JSON parsing errors by default
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}
