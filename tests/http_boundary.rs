mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{app, bearer_token, offline_state, send};

#[tokio::test]
async fn quote_rejects_zero_quantity_before_pricing() {
    let body = json!({
        "items": [
            { "storeProductId": Uuid::new_v4(), "quantity": 0 }
        ]
    });

    let (status, json) = send(app(offline_state()), "POST", "/api/cart/quote", Some(body), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(
        json["data"]["details"],
        json!(["items[0].quantity: quantity must not be less than 1"])
    );
}

#[tokio::test]
async fn quote_rejects_non_uuid_store_product_id() {
    let body = json!({ "items": [ { "storeProductId": "SP1", "quantity": 1 } ] });

    let (status, json) = send(app(offline_state()), "POST", "/api/cart/quote", Some(body), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["data"]["details"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn quote_requires_items_array() {
    let (status, json) = send(
        app(offline_state()),
        "POST",
        "/api/cart/quote",
        Some(json!({ "items": "nope" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"]["error"], "Bad Request");
}

#[tokio::test]
async fn empty_cart_quotes_zero_without_lookups() {
    let (status, json) = send(
        app(offline_state()),
        "POST",
        "/api/cart/quote",
        Some(json!({ "items": [] })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"].as_f64(), Some(0.0));
    assert_eq!(json["items"], json!([]));
}

#[tokio::test]
async fn mutations_require_a_bearer_token() {
    let (status, json) = send(
        app(offline_state()),
        "POST",
        "/api/stores",
        Some(json!({ "name": "Supermercado Central" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Missing Authorization header");
}

#[tokio::test]
async fn mutations_reject_foreign_tokens() {
    let (status, _) = send(
        app(offline_state()),
        "DELETE",
        &format!("/api/products/{}", Uuid::new_v4()),
        None,
        Some("Bearer not-a-jwt"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_update_accepts_put_and_patch() {
    let uri = format!("/api/products/{}", Uuid::new_v4());
    for method in ["PUT", "PATCH"] {
        let (status, _) = send(
            app(offline_state()),
            method,
            &uri,
            Some(json!({ "name": "Leche Descremada" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method}");
    }
}

#[tokio::test]
async fn store_payload_is_validated_after_auth() {
    let token = bearer_token();
    let (status, json) = send(
        app(offline_state()),
        "POST",
        "/api/stores",
        Some(json!({ "name": "" })),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"]["details"], json!(["name: name should not be empty"]));
}

#[tokio::test]
async fn negative_listing_price_is_rejected() {
    let token = bearer_token();
    let (status, json) = send(
        app(offline_state()),
        "POST",
        &format!("/api/stores/{}/products", Uuid::new_v4()),
        Some(json!({ "productId": Uuid::new_v4(), "price": -2.5, "stock": 3 })),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["data"]["details"], json!(["price: price must not be less than 0"]));
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (status, json) = send(app(offline_state()), "GET", "/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["path"], "/nope");
}

#[tokio::test]
async fn health_route_is_mounted() {
    let (status, json) = send(app(offline_state()), "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
}
