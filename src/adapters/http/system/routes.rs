//! Route configuration for service endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{health, survey_script};
use crate::adapters::http::state::AppState;

/// Creates the service router.
///
/// Routes:
/// - `GET /health` - Liveness and database ping
/// - `GET /api/survey/script` - The survey questions and agent prompt
pub fn system_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/survey/script", get(survey_script))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::tests::memory_state;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::adapters::voice::MockVoiceProvider;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::ports::HealthCheck;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct DownDatabase;

    #[async_trait]
    impl HealthCheck for DownDatabase {
        async fn ping(&self) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection refused"))
        }
    }

    fn state() -> AppState {
        memory_state(
            Arc::new(InMemorySurveyStore::new()),
            Arc::new(MockVoiceProvider::new()),
        )
    }

    async fn get(state: AppState, uri: &str) -> axum::response::Response {
        system_router()
            .with_state(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_when_database_answers() {
        let response = get(state(), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["database"], "ok");
    }

    #[tokio::test]
    async fn health_is_unavailable_when_database_is_down() {
        let mut state = state();
        state.health = Arc::new(DownDatabase);

        let response = get(state, "/health").await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "degraded");
    }

    #[tokio::test]
    async fn script_lists_five_questions() {
        let response = get(state(), "/api/survey/script").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["questions"].as_array().unwrap().len(), 5);
        assert_eq!(body["questions"][0]["number"], 1);
        assert!(body["first_message"]
            .as_str()
            .unwrap()
            .contains("{{customer_name}}"));
    }
}
