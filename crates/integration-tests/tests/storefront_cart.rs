//! Cart endpoints: session persistence, HTMX fragments, and triggers.

use axum::http::StatusCode;
use cornershop_integration_tests::TestClient;

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_new_visitor_has_empty_cart() {
    let mut client = TestClient::new();
    assert_eq!(client.cart_count().await, 0);

    let page = client.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_add_aggregates_and_triggers_refresh() {
    let mut client = TestClient::new();

    for expected in 1..=3 {
        let response = client.post_form("/cart/add", &[("product_id", "1")]).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.hx_trigger(), Some("cart-updated"));
        assert!(response.body.contains(&format!(">{expected}<")));
    }

    let page = client.get("/cart").await;
    assert!(page.body.contains("Wireless Headphones"));
    assert!(page.body.contains("$179.97"));
    assert_eq!(page.body.matches("Wireless Headphones").count(), 2); // name and alt text
}

#[tokio::test]
async fn test_add_unknown_product_is_ignored() {
    let mut client = TestClient::new();
    let response = client.post_form("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.hx_trigger(), None);
    assert_eq!(client.cart_count().await, 0);
}

#[tokio::test]
async fn test_add_rejects_malformed_id() {
    let mut client = TestClient::new();
    let response = client.post_form("/cart/add", &[("product_id", "one")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_quantity() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "2")]).await;

    let response = client
        .post_form("/cart/update", &[("product_id", "2"), ("quantity", "4")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.hx_trigger(), Some("cart-updated"));
    assert!(response.body.contains("$140.00"));
    assert_eq!(client.cart_count().await, 4);
}

#[tokio::test]
async fn test_fractional_quantity_keeps_whole_units() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "2")]).await;

    let response = client
        .post_form("/cart/update", &[("product_id", "2"), ("quantity", "2.5")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Bluetooth Speaker"));
    assert!(response.body.contains("$70.00"));
    assert_eq!(client.cart_count().await, 2);
}

#[tokio::test]
async fn test_invalid_quantity_removes_row() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "1")]).await;
    client.post_form("/cart/add", &[("product_id", "2")]).await;

    for quantity in ["0", "-1", "abc", ""] {
        client.post_form("/cart/add", &[("product_id", "1")]).await;
        let response = client
            .post_form("/cart/update", &[("product_id", "1"), ("quantity", quantity)])
            .await;
        assert_eq!(response.status, StatusCode::OK, "quantity {quantity:?}");
        assert!(!response.body.contains("Wireless Headphones"), "quantity {quantity:?}");
        assert_eq!(client.cart_count().await, 1, "quantity {quantity:?}");
    }
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "1")]).await;
    client.post_form("/cart/add", &[("product_id", "3")]).await;

    let response = client.post_form("/cart/remove", &[("product_id", "1")]).await;
    assert_eq!(response.hx_trigger(), Some("cart-updated"));
    assert!(response.body.contains("Denim Jacket"));
    assert!(!response.body.contains("Wireless Headphones"));

    // Removing again is harmless.
    let response = client.post_form("/cart/remove", &[("product_id", "1")]).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = client.post_form("/cart/clear", &[]).await;
    assert_eq!(response.hx_trigger(), Some("cart-updated"));
    assert!(response.body.contains("Your cart is empty."));
    assert_eq!(client.cart_count().await, 0);
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = TestClient::new();
    alice.post_form("/cart/add", &[("product_id", "3")]).await;

    let mut bob = alice.stranger();
    assert_eq!(bob.cart_count().await, 0);
    assert_eq!(alice.cart_count().await, 1);
}
