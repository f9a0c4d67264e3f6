//! Route configuration for call endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_call, get_transcript, initiate_batch, initiate_call, list_calls, sync_call,
};
use crate::adapters::http::state::AppState;

/// Creates the call router.
///
/// Routes:
/// - `POST /api/calls` - Initiate one call
/// - `GET /api/calls` - List calls (`status`, `limit`, `offset`)
/// - `POST /api/calls/batch` - Initiate calls in paced chunks
/// - `GET /api/calls/:id` - Call detail with responses
/// - `GET /api/calls/:id/transcript` - Stored transcript
/// - `POST /api/calls/:id/sync` - Fetch and record the conversation
pub fn call_router() -> Router<AppState> {
    Router::new()
        .route("/api/calls", get(list_calls).post(initiate_call))
        .route("/api/calls/batch", post(initiate_batch))
        .route("/api/calls/:id", get(get_call))
        .route("/api/calls/:id/transcript", get(get_transcript))
        .route("/api/calls/:id/sync", post(sync_call))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::tests::memory_state;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::adapters::voice::MockVoiceProvider;
    use crate::application::handlers::call::{outcome, placed_call, stored_customer};
    use crate::ports::ConversationStatus;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: &Arc<InMemorySurveyStore>, voice: &Arc<MockVoiceProvider>) -> Router {
        call_router().with_state(memory_state(store.clone(), voice.clone()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn initiate_call_places_call() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());
        let customer = stored_customer(&store).await;

        let response = app(&store, &voice)
            .oneshot(post_json(
                "/api/calls",
                serde_json::json!({ "customer_id": customer.id().to_string() }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["status"], "in_progress");
        assert!(body["conversation_id"].is_string());
        assert_eq!(voice.placed_calls().len(), 1);
    }

    #[tokio::test]
    async fn refused_call_is_bad_gateway_and_recorded_as_failed() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());
        let customer = stored_customer(&store).await;
        voice.fail_number(customer.phone_number().as_str());

        let response = app(&store, &voice)
            .oneshot(post_json(
                "/api/calls",
                serde_json::json!({ "customer_id": customer.id().to_string() }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let listed = app(&store, &voice)
            .oneshot(get_req("/api/calls?status=failed"))
            .await
            .unwrap();
        let listed = body_json(listed).await;
        assert_eq!(listed["count"], 1);
        assert!(listed["calls"][0]["failure_reason"]
            .as_str()
            .unwrap()
            .contains("cannot dial"));
    }

    #[tokio::test]
    async fn initiate_call_for_unknown_customer_is_not_found() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());

        let response = app(&store, &voice)
            .oneshot(post_json(
                "/api/calls",
                serde_json::json!({
                    "customer_id": crate::domain::foundation::CustomerId::new().to_string()
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "CUSTOMER_NOT_FOUND");
    }

    #[tokio::test]
    async fn batch_without_ids_calls_everyone() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());
        for _ in 0..3 {
            stored_customer(&store).await;
        }

        let response = app(&store, &voice)
            .oneshot(post_json("/api/calls/batch", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["requested"], 3);
        assert_eq!(body["placed"], 3);
        assert_eq!(body["failed"], 0);
        assert_eq!(voice.placed_calls().len(), 3);
    }

    #[tokio::test]
    async fn batch_with_malformed_id_is_bad_request() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());

        let response = app(&store, &voice)
            .oneshot(post_json(
                "/api/calls/batch",
                serde_json::json!({ "customer_ids": ["nope"] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(voice.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_status_filter_is_bad_request() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());

        let response = app(&store, &voice)
            .oneshot(get_req("/api/calls?status=ringing"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn transcript_before_webhook_is_not_found() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());
        let call = placed_call(&store, "conv_40").await;

        let response = app(&store, &voice)
            .oneshot(get_req(&format!("/api/calls/{}/transcript", call.id())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "TRANSCRIPT_NOT_FOUND");
    }

    #[tokio::test]
    async fn sync_records_conversation() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());
        let call = placed_call(&store, "conv_41").await;
        voice.set_conversation(outcome("conv_41", ConversationStatus::Done));

        let synced = app(&store, &voice)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/calls/{}/sync", call.id()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(synced.status(), StatusCode::OK);
        let synced = body_json(synced).await;
        assert_eq!(synced["result"], "recorded");
        assert_eq!(synced["call"]["status"], "completed");

        let detail = app(&store, &voice)
            .oneshot(get_req(&format!("/api/calls/{}", call.id())))
            .await
            .unwrap();
        let detail = body_json(detail).await;
        assert_eq!(detail["responses"].as_array().unwrap().len(), 2);
        assert_eq!(detail["responses"][0]["question_number"], 1);
        assert_eq!(detail["responses"][0]["sentiment"], "positive");
    }

    #[tokio::test]
    async fn unknown_call_is_not_found() {
        let store = Arc::new(InMemorySurveyStore::new());
        let voice = Arc::new(MockVoiceProvider::new());

        let response = app(&store, &voice)
            .oneshot(get_req(&format!(
                "/api/calls/{}",
                crate::domain::foundation::CallId::new()
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
