mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use shopsearch_core::AppConfig;

use crate::middleware::request_id;
use crate::providers::Providers;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub providers: Arc<Providers>,
}

/// Error taxonomy for the HTTP surface.
///
/// Every failure reaching the client is one of these three kinds, rendered
/// as a single `{"error": "<message>"}` body. Upstream detail is logged at
/// the call site and never serialized.
#[derive(Debug)]
pub enum ApiError {
    /// Required request input is missing (400).
    Validation(&'static str),
    /// Required configuration is absent (500, naming the variable).
    Configuration(&'static str),
    /// An upstream provider call failed (500, generic provider-scoped
    /// message).
    Upstream(&'static str),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.to_owned()),
            ApiError::Configuration(var) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{var} missing in .env"),
            ),
            ApiError::Upstream(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/api/test", get(api_test))
        .route("/api/search/amazon", get(search::amazon_raw))
        .route("/api/search/walmart-simple", get(search::walmart_simple))
        .route("/api/search/ebay", get(search::ebay))
        .route("/api/search", get(search::combined))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    "Shopping AI Backend is running!"
}

async fn ping() -> Json<MessageBody> {
    Json(MessageBody { message: "pong" })
}

async fn api_test() -> Json<MessageBody> {
    Json(MessageBody {
        message: "API is working!",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use shopsearch_core::AffiliateTags;
    use shopsearch_providers::{AmazonClient, EbayClient, WalmartClient};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Builds an `AppState` whose provider slots point at the given mock
    /// base URLs. Credentials are treated as configured exactly for the
    /// providers that get a base URL.
    fn test_state(
        amazon_base: Option<&str>,
        walmart_base: Option<&str>,
        ebay_base: Option<&str>,
    ) -> AppState {
        let affiliate = AffiliateTags {
            amazon_tag: Some("mytag-20".to_owned()),
            ..AffiliateTags::default()
        };

        let config = AppConfig {
            bind_addr: "0.0.0.0:0".parse().expect("valid socket addr"),
            log_level: "info".to_owned(),
            scraper_api_key: (amazon_base.is_some() || walmart_base.is_some())
                .then(|| "test-key".to_owned()),
            walmart_structured_url: walmart_base.map(ToOwned::to_owned),
            ebay_oauth_token: ebay_base.map(|_| "test-token".to_owned()),
            affiliate: affiliate.clone(),
            request_timeout_secs: 5,
            user_agent: "shopsearch-test/0.1".to_owned(),
        };

        let amazon = amazon_base.map(|base| {
            AmazonClient::with_base_url("test-key", affiliate.clone(), 5, &config.user_agent, base)
                .expect("amazon client")
        });
        let walmart = walmart_base.map(|base| {
            WalmartClient::new(base, "test-key", 5, &config.user_agent).expect("walmart client")
        });
        let ebay = ebay_base.map(|base| {
            EbayClient::with_base_url("test-token", affiliate.clone(), 5, &config.user_agent, base)
                .expect("ebay client")
        });

        AppState {
            config: Arc::new(config),
            providers: Arc::new(Providers {
                amazon,
                walmart,
                ebay,
            }),
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[tokio::test]
    async fn ping_returns_pong() {
        let app = build_app(test_state(None, None, None));
        let (status, json) = get_json(app, "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "message": "pong" }));
    }

    #[tokio::test]
    async fn api_test_route_answers() {
        let app = build_app(test_state(None, None, None));
        let (status, json) = get_json(app, "/api/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "message": "API is working!" }));
    }

    #[tokio::test]
    async fn root_returns_plain_banner() {
        let app = build_app(test_state(None, None, None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Shopping AI Backend is running!");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id_header() {
        let app = build_app(test_state(None, None, None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn missing_query_is_rejected_before_any_upstream_call() {
        let server = MockServer::start().await;
        // The mock refuses all traffic; reaching it at all fails the test.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(Some(&base), Some(&base), None));

        for uri in [
            "/api/search",
            "/api/search/amazon",
            "/api/search/walmart-simple",
            "/api/search/ebay",
        ] {
            let (status, json) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
            assert_eq!(json, json!({ "error": "Missing query" }), "uri: {uri}");
        }

        // An empty query string counts as missing.
        let (status, json) = get_json(app, "/api/search?query=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "error": "Missing query" }));

        server.verify().await;
    }

    #[tokio::test]
    async fn amazon_route_without_key_names_the_variable() {
        let app = build_app(test_state(None, None, None));
        let (status, json) = get_json(app, "/api/search/amazon?query=mouse").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "SCRAPER_API_KEY missing in .env" }));
    }

    #[tokio::test]
    async fn walmart_route_without_base_url_names_the_variable() {
        let server = MockServer::start().await;
        let base = server.uri();
        let app = build_app(test_state(Some(&base), None, None));
        let (status, json) = get_json(app, "/api/search/walmart-simple?query=mouse").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({ "error": "WALMART_STRUCTURED_URL missing in .env" })
        );
    }

    #[tokio::test]
    async fn ebay_route_without_token_names_the_variable() {
        let app = build_app(test_state(None, None, None));
        let (status, json) = get_json(app, "/api/search/ebay?query=mouse").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "EBAY_OAUTH_TOKEN missing in .env" }));
    }

    #[tokio::test]
    async fn amazon_raw_route_passes_the_upstream_payload_through() {
        let server = MockServer::start().await;
        let payload = json!({
            "results": [{ "asin": "B001", "title": "Mouse X" }],
            "pagination": { "current_page": 1 }
        });
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(Some(&base), None, None));
        let (status, json) = get_json(app, "/api/search/amazon?query=mouse").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], json!(true));
        assert_eq!(json["query"], json!("mouse"));
        assert_eq!(json["data"], payload);
    }

    #[tokio::test]
    async fn amazon_raw_route_maps_upstream_failure_to_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(Some(&base), None, None));
        let (status, json) = get_json(app, "/api/search/amazon?query=mouse").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Amazon API request failed" }));
    }

    #[tokio::test]
    async fn walmart_simple_route_returns_normalized_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "W1",
                    "name": "Mouse Y",
                    "url": "https://www.walmart.com/ip/W1",
                    "price": "invalid",
                    "rating": { "average_rating": 4.0, "number_of_reviews": 5 }
                }]
            })))
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(Some(&base), Some(&base), None));
        let (status, json) = get_json(app, "/api/search/walmart-simple?query=mouse").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], json!("walmart"));
        assert_eq!(json["query"], json!("mouse"));
        assert_eq!(json["total"], json!(1));
        let product = &json["products"][0];
        assert_eq!(product["title"], json!("Mouse Y"));
        assert!(product["price"].is_null());
        assert_eq!(product["stars"], json!(4.0));
        assert_eq!(product["reviewCount"], json!(5));
        // The canonical field set is complete even for unset values.
        assert!(product.as_object().unwrap().contains_key("availability"));
    }

    #[tokio::test]
    async fn combined_route_merges_and_counts_by_source() {
        let amazon_server = MockServer::start().await;
        let walmart_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "asin": "B001",
                    "title": "Mouse X",
                    "url": "http://a.co/d/123",
                    "price": { "value": 19.99, "currency": "USD" },
                    "rating": 4.5,
                    "reviews_count": 120
                }]
            })))
            .mount(&amazon_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "W1",
                    "name": "Mouse Y",
                    "url": "https://www.walmart.com/ip/W1",
                    "price": 12.0
                }]
            })))
            .mount(&walmart_server)
            .await;

        let amazon_base = amazon_server.uri();
        let walmart_base = walmart_server.uri();
        let app = build_app(test_state(Some(&amazon_base), Some(&walmart_base), None));
        let (status, json) = get_json(app, "/api/search?query=wireless%20mouse").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["query"], json!("wireless mouse"));
        assert_eq!(json["total"], json!(2));
        assert_eq!(json["bySource"], json!({ "amazon": 1, "walmart": 1 }));

        let products = json["products"].as_array().expect("products array");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["source"], json!("amazon"));
        assert_eq!(products[0]["url"], json!("http://a.co/d/123?tag=mytag-20"));
        assert_eq!(products[1]["source"], json!("walmart"));
    }

    #[tokio::test]
    async fn combined_route_degrades_to_partial_results() {
        let amazon_server = MockServer::start().await;
        let walmart_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&amazon_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "W1",
                    "name": "Mouse Y",
                    "url": "https://www.walmart.com/ip/W1",
                    "price": 12.0
                }]
            })))
            .mount(&walmart_server)
            .await;

        let amazon_base = amazon_server.uri();
        let walmart_base = walmart_server.uri();
        let app = build_app(test_state(Some(&amazon_base), Some(&walmart_base), None));
        let (status, json) = get_json(app, "/api/search?query=mouse").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], json!(1));
        assert_eq!(
            json["bySource"]["amazon"],
            json!({ "error": "amazon search failed" })
        );
        assert_eq!(json["bySource"]["walmart"], json!(1));
    }

    #[tokio::test]
    async fn combined_route_fails_when_every_provider_fails() {
        let amazon_server = MockServer::start().await;
        let walmart_server = MockServer::start().await;
        for server in [&amazon_server, &walmart_server] {
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(502))
                .mount(server)
                .await;
        }

        let amazon_base = amazon_server.uri();
        let walmart_base = walmart_server.uri();
        let app = build_app(test_state(Some(&amazon_base), Some(&walmart_base), None));
        let (status, json) = get_json(app, "/api/search?query=mouse").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Combined search failed" }));
    }

    #[tokio::test]
    async fn combined_route_includes_ebay_when_configured() {
        let amazon_server = MockServer::start().await;
        let walmart_server = MockServer::start().await;
        let ebay_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&amazon_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&walmart_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "itemSummaries": [{
                    "itemId": "v1|110|0",
                    "title": "Mouse E",
                    "itemWebUrl": "https://www.ebay.com/itm/110"
                }]
            })))
            .mount(&ebay_server)
            .await;

        let amazon_base = amazon_server.uri();
        let walmart_base = walmart_server.uri();
        let ebay_base = ebay_server.uri();
        let app = build_app(test_state(
            Some(&amazon_base),
            Some(&walmart_base),
            Some(&ebay_base),
        ));
        let (status, json) = get_json(app, "/api/search?query=mouse").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], json!(1));
        assert_eq!(
            json["bySource"],
            json!({ "amazon": 0, "walmart": 0, "ebay": 1 })
        );
        assert_eq!(json["products"][0]["source"], json!("ebay"));
    }

    #[tokio::test]
    async fn ebay_route_returns_normalized_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "itemSummaries": [{
                    "itemId": "v1|110|0",
                    "title": "Mouse E",
                    "itemWebUrl": "https://www.ebay.com/itm/110",
                    "price": { "value": "24.95", "currency": "USD" }
                }]
            })))
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(None, None, Some(&base)));
        let (status, json) = get_json(app, "/api/search/ebay?query=mouse").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], json!("ebay"));
        assert_eq!(json["total"], json!(1));
        assert_eq!(json["products"][0]["price"], json!(24.95));
    }

    #[tokio::test]
    async fn ebay_route_maps_upstream_failure_to_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(None, None, Some(&base)));
        let (status, json) = get_json(app, "/api/search/ebay?query=mouse").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Failed to fetch eBay products." }));
    }

    #[tokio::test]
    async fn walmart_simple_route_maps_upstream_failure_to_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let base = server.uri();
        let app = build_app(test_state(Some(&base), Some(&base), None));
        let (status, json) = get_json(app, "/api/search/walmart-simple?query=mouse").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "Walmart simple API failed" }));
    }
}
