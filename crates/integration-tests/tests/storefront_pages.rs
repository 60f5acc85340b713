//! Catalog pages: home tiles, featured products, category filtering.

use axum::http::StatusCode;
use cornershop_integration_tests::TestClient;

#[tokio::test]
async fn test_home_lists_categories_and_featured() {
    let mut client = TestClient::new();
    let page = client.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("/products?category=electronics"));
    assert!(page.body.contains("/products?category=fashion"));
    assert!(page.body.contains("images/electronics.jpg"));
    assert!(page.body.contains("Wireless Headphones"));
    assert!(!page.body.contains("Denim Jacket"));
}

#[tokio::test]
async fn test_listing_filters_by_category() {
    let mut client = TestClient::new();
    let page = client.get("/products?category=fashion").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Denim Jacket"));
    assert!(page.body.contains("$74.99"));
    assert!(!page.body.contains("Bluetooth Speaker"));
    assert!(page.body.contains("aria-current=\"page\">Fashion<"));
}

#[tokio::test]
async fn test_unknown_category_shows_everything() {
    let mut client = TestClient::new();
    let page = client.get("/products?category=garden").await;
    assert_eq!(page.status, StatusCode::OK);
    for name in ["Wireless Headphones", "Bluetooth Speaker", "Denim Jacket"] {
        assert!(page.body.contains(name), "{name}");
    }
    assert!(page.body.contains("aria-current=\"page\">All<"));
}

#[tokio::test]
async fn test_header_badge_shows_cart_count() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", &[("product_id", "2")]).await;
    client.post_form("/cart/add", &[("product_id", "2")]).await;

    let page = client.get("/products").await;
    assert!(page.body.contains("hx-swap=\"outerHTML\">2</span>"));
}
