//! API Routes
//!
//! Configures the Axum router with the demo endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{delete_handler, get_handler, health_handler, set_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /set` - Write the demo list
/// - `GET /get` - Log the demo list
/// - `GET /del` - Remove one word from the demo list
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", get(set_handler))
        .route("/get", get(get_handler))
        .route("/del", get(delete_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListWriteMode;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::memory(ListWriteMode::Append))
    }

    async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_text(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("healthy"));
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let (status, body) = get_text(create_test_app(), "/set").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "set success~");
    }

    #[tokio::test]
    async fn test_get_endpoint() {
        let (status, body) = get_text(create_test_app(), "/get").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "get success");
    }

    #[tokio::test]
    async fn test_del_endpoint() {
        let (status, body) = get_text(create_test_app(), "/del").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "delete success");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get_text(create_test_app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
