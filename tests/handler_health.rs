mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_registry::api::handlers::health_handler;

#[tokio::test]
async fn test_health_ok() {
    let (state, registry) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    common::create_test_link(&registry, "alive1", "https://example.com").await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["registry"]["status"], "ok");
    assert!(
        json["checks"]["registry"]["message"]
            .as_str()
            .unwrap()
            .contains("1 links")
    );
    assert!(json["version"].is_string());
}
