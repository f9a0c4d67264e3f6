//! Route configuration for webhook endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::handle_voice_webhook;
use crate::adapters::http::state::AppState;

/// Creates the webhook router.
///
/// Routes:
/// - `POST /api/webhooks/voice` - Post-call transcription webhook
pub fn webhook_router() -> Router<AppState> {
    Router::new().route("/api/webhooks/voice", post(handle_voice_webhook))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::AppState;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::adapters::voice::{ElevenLabsConfig, ElevenLabsVoiceProvider};
    use crate::application::handlers::call::placed_call;
    use crate::config::BatchConfig;
    use crate::domain::webhook::{sign_payload, SIGNATURE_HEADER};
    use crate::ports::CallRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "wsec_test";

    fn app(store: &Arc<InMemorySurveyStore>) -> Router {
        let config = ElevenLabsConfig::new("xi-test", "agent_123", "phnum_456")
            .with_base_url("http://unused.invalid")
            .with_webhook_secret(SECRET);
        let voice = Arc::new(ElevenLabsVoiceProvider::new(config).unwrap());
        let state = AppState::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            voice,
            store.clone(),
            BatchConfig::default(),
        );
        webhook_router().with_state(state)
    }

    fn payload(conversation: &str) -> String {
        serde_json::json!({
            "type": "post_call_transcription",
            "event_timestamp": chrono::Utc::now().timestamp(),
            "data": {
                "conversation_id": conversation,
                "status": "done",
                "transcript": [
                    { "role": "agent", "message": "Is there anything else you would like to share?" },
                    { "role": "user", "message": "The new app is great." }
                ],
                "metadata": { "call_duration_secs": 63 },
                "analysis": {
                    "transcript_summary": "Likes the app.",
                    "data_collection_results": {}
                }
            }
        })
        .to_string()
    }

    fn delivery(body: String, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/webhooks/voice")
            .header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn signed(body: &str) -> Option<String> {
        Some(sign_payload(
            SECRET,
            chrono::Utc::now().timestamp(),
            body.as_bytes(),
        ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn signed_delivery_completes_call() {
        let store = Arc::new(InMemorySurveyStore::new());
        let call = placed_call(&store, "conv_w1").await;
        let body = payload("conv_w1");

        let response = app(&store)
            .oneshot(delivery(body.clone(), signed(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let ack = body_json(response).await;
        assert_eq!(ack["status"], "processed");
        assert_eq!(ack["call_id"], call.id().to_string());

        let stored = CallRepository::find_by_id(store.as_ref(), call.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.duration_secs(), Some(63));
        assert_eq!(stored.summary(), Some("Likes the app."));
    }

    #[tokio::test]
    async fn redelivery_is_acknowledged_as_duplicate() {
        let store = Arc::new(InMemorySurveyStore::new());
        placed_call(&store, "conv_w2").await;
        let body = payload("conv_w2");

        app(&store)
            .oneshot(delivery(body.clone(), signed(&body)))
            .await
            .unwrap();
        let again = app(&store)
            .oneshot(delivery(body.clone(), signed(&body)))
            .await
            .unwrap();

        assert_eq!(again.status(), StatusCode::OK);
        assert_eq!(body_json(again).await["status"], "duplicate");
    }

    #[tokio::test]
    async fn missing_signature_is_unauthorized() {
        let store = Arc::new(InMemorySurveyStore::new());
        placed_call(&store, "conv_w3").await;

        let response = app(&store)
            .oneshot(delivery(payload("conv_w3"), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn tampered_body_is_unauthorized() {
        let store = Arc::new(InMemorySurveyStore::new());
        placed_call(&store, "conv_w4").await;
        let body = payload("conv_w4");
        let signature = signed(&body);
        let tampered = body.replace("great", "awful");

        let response = app(&store)
            .oneshot(delivery(tampered, signature))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "INVALID_WEBHOOK_SIGNATURE");
    }

    #[tokio::test]
    async fn unknown_conversation_is_not_found() {
        let store = Arc::new(InMemorySurveyStore::new());
        let body = payload("conv_nobody");

        let response = app(&store)
            .oneshot(delivery(body.clone(), signed(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_event_types_are_ignored() {
        let store = Arc::new(InMemorySurveyStore::new());
        let body = serde_json::json!({ "type": "post_call_audio", "data": {} }).to_string();

        let response = app(&store)
            .oneshot(delivery(body.clone(), signed(&body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let ack = body_json(response).await;
        assert_eq!(ack["status"], "ignored");
        assert_eq!(ack["event_type"], "post_call_audio");
    }
}
