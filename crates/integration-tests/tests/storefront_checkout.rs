//! Checkout: billing validation, order placement, payment hand-off and callbacks.

use axum::http::StatusCode;
use cornershop_integration_tests::TestClient;

const BILLING: &[(&str, &str)] = &[
    ("name", "Ann Lee"),
    ("email", "ann@example.com"),
    ("address", "12 Main Street"),
    ("phone", "08031234567"),
];

fn billing_with(field: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    BILLING
        .iter()
        .map(|&(k, v)| if k == field { (k, value) } else { (k, v) })
        .collect()
}

async fn client_with_cart() -> TestClient {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "1")]).await;
    client.post_form("/cart/add", &[("product_id", "1")]).await;
    client
}

#[tokio::test]
async fn test_checkout_page_summarises_cart() {
    let mut client = client_with_cart().await;
    let page = client.get("/checkout").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Wireless Headphones x 2"));
    assert!(page.body.contains("$119.98"));
}

#[tokio::test]
async fn test_place_order_clears_cart() {
    let mut client = client_with_cart().await;
    let response = client.post_form("/checkout", BILLING).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Thank you, Ann Lee! Your order has been placed."));
    assert!(response.body.contains("url=/"));
    assert!(response.body.contains("Placed 20"));
    assert!(response.body.contains(" UTC</p>"));
    assert_eq!(client.cart_count().await, 0);
}

#[tokio::test]
async fn test_invalid_billing_rerenders_form_and_keeps_cart() {
    let cases = [
        ("name", "A1", "Please enter a valid name."),
        ("email", "ann@example", "Please enter a valid email."),
        ("address", "12", "Please enter a valid address."),
        ("phone", "+2348031234567", "Please enter a valid phone number."),
        ("phone", "", "Please fill in all required fields."),
    ];

    for (field, value, message) in cases {
        let mut client = client_with_cart().await;
        let response = client.post_form("/checkout", &billing_with(field, value)).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "{field}");
        assert!(response.body.contains(message), "{field}");
        assert_eq!(client.cart_count().await, 2, "{field}");
    }
}

#[tokio::test]
async fn test_pay_returns_widget_setup_in_minor_units() {
    let mut client = client_with_cart().await;
    let response = client.post_form("/checkout/pay", BILLING).await;
    assert_eq!(response.status, StatusCode::OK);

    let handoff = response.json();
    assert_eq!(handoff["provider"], "paystack");
    assert_eq!(handoff["key"], "pk_test_integration");
    assert_eq!(handoff["email"], "ann@example.com");
    assert_eq!(handoff["amount"], 11998);
    assert_eq!(handoff["currency"], "NGN");
    assert_eq!(
        handoff["callback_url"],
        "http://localhost:3000/checkout/payment/success"
    );

    // The cart is only cleared by the success callback.
    assert_eq!(client.cart_count().await, 2);
}

#[tokio::test]
async fn test_pay_with_empty_cart() {
    let mut client = TestClient::new();
    let response = client.post_form("/checkout/pay", BILLING).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body, "Your cart is empty!");
}

#[tokio::test]
async fn test_pay_with_blank_field() {
    let mut client = client_with_cart().await;
    let response = client
        .post_form("/checkout/pay", &billing_with("email", "  "))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body,
        "Please fill in all billing details before proceeding to payment."
    );
}

#[tokio::test]
async fn test_payment_success_clears_cart() {
    let mut client = client_with_cart().await;
    let response = client
        .post_form("/checkout/payment/success", &[("reference", "T685312")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.hx_trigger(), Some("cart-updated"));

    let outcome = response.json();
    assert_eq!(outcome["message"], "Payment successful! Reference: T685312");
    assert_eq!(outcome["redirect_to"], "/");
    assert!(outcome["paid_at"].as_str().is_some_and(|t| t.ends_with('Z')));
    assert_eq!(client.cart_count().await, 0);
}

#[tokio::test]
async fn test_payment_success_without_reference() {
    let mut client = client_with_cart().await;
    let response = client.post_form("/checkout/payment/success", &[]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(client.cart_count().await, 2);
}

#[tokio::test]
async fn test_payment_cancel_keeps_cart() {
    let mut client = client_with_cart().await;
    let response = client.post_form("/checkout/payment/cancel", &[]).await;
    assert_eq!(response.status, StatusCode::OK);

    let outcome = response.json();
    assert_eq!(outcome["message"], "Payment window closed.");
    assert!(outcome.get("redirect_to").is_none());
    assert!(outcome.get("paid_at").is_none());
    assert_eq!(client.cart_count().await, 2);
}
