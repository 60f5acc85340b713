//! Integration tests for Corner Shop.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`;
//! no server or network is needed. A [`TestClient`] plays one visitor and
//! carries its session cookie between requests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cornershop-integration-tests
//! ```

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use cornershop_storefront::catalog::StaticCatalog;
use cornershop_storefront::config::StorefrontConfig;
use cornershop_storefront::state::AppState;

/// Products every test app is built with.
pub const TEST_CATALOG: &str = r#"[
    {"id": 1, "name": "Wireless Headphones", "price": 59.99, "img": "images/headphones.jpg", "category": "electronics", "featured": true, "rating": 4},
    {"id": 2, "name": "Bluetooth Speaker", "price": 35, "img": "images/speaker.jpg", "category": "electronics", "rating": 4},
    {"id": 3, "name": "Denim Jacket", "price": 74.99, "img": "images/jacket.jpg", "category": "fashion", "rating": 5}
]"#;

const BODY_LIMIT: usize = 1024 * 1024;

/// Build a storefront router over the test catalog.
///
/// # Panics
///
/// Panics if the fixed test configuration is invalid.
#[must_use]
pub fn test_router() -> Router {
    let config = StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_BASE_URL" => Some("http://localhost:3000".to_string()),
        "PAYSTACK_PUBLIC_KEY" => Some("pk_test_integration".to_string()),
        _ => None,
    })
    .expect("test config");
    let catalog = StaticCatalog::from_json(TEST_CATALOG).expect("test catalog");
    let state = AppState::new(config, catalog).expect("test state");
    cornershop_storefront::app(state)
}

/// One visitor with its own session cookie.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }

    /// Value of the `HX-Trigger` header, if any.
    #[must_use]
    pub fn hx_trigger(&self) -> Option<&str> {
        self.headers.get("HX-Trigger").and_then(|v| v.to_str().ok())
    }
}

impl TestClient {
    /// A fresh visitor on a fresh storefront.
    #[must_use]
    pub fn new() -> Self {
        Self::on(test_router())
    }

    /// A fresh visitor on an existing storefront.
    #[must_use]
    pub const fn on(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// Another visitor on the same storefront, without this one's session.
    #[must_use]
    pub fn stranger(&self) -> Self {
        Self::on(self.router.clone())
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    /// Current cart item count, read through the badge endpoint.
    pub async fn cart_count(&mut self) -> u64 {
        let response = self.get("/cart/count").await;
        response
            .body
            .split('>')
            .nth(1)
            .and_then(|rest| rest.split('<').next())
            .expect("badge markup")
            .trim()
            .parse()
            .expect("numeric count")
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().expect("cookie header"));
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(set_cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("response body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
