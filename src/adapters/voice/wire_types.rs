//! Voice platform wire types.
//!
//! Request and response bodies of the conversational-agent API, and the
//! post-call webhook envelope. Conversions into port types live here so the
//! HTTP adapter and the mock share one parser.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConversationId;
use crate::domain::survey::{Role, Transcript, TranscriptTurn};
use crate::domain::webhook::WebhookError;
use crate::ports::{ConversationOutcome, ConversationStatus, OutboundCallRequest, WebhookEvent};

/// Webhook type carrying transcript and analysis.
pub const POST_CALL_TRANSCRIPTION: &str = "post_call_transcription";

// ════════════════════════════════════════════════════════════════════════════════
// Outbound Call
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /v1/convai/twilio/outbound-call`.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundCallBody {
    pub agent_id: String,
    pub agent_phone_number_id: String,
    pub to_number: String,
    pub conversation_initiation_client_data: ClientData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientData {
    pub dynamic_variables: BTreeMap<String, String>,
    pub conversation_config_override: ConfigOverride,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigOverride {
    pub agent: AgentOverride,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentOverride {
    pub prompt: PromptOverride,
    pub first_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptOverride {
    pub prompt: String,
}

impl OutboundCallBody {
    pub fn new(agent_id: &str, agent_phone_number_id: &str, request: OutboundCallRequest) -> Self {
        let mut dynamic_variables = BTreeMap::new();
        dynamic_variables.insert("customer_name".to_string(), request.customer_name);

        Self {
            agent_id: agent_id.to_string(),
            agent_phone_number_id: agent_phone_number_id.to_string(),
            to_number: request.to_number,
            conversation_initiation_client_data: ClientData {
                dynamic_variables,
                conversation_config_override: ConfigOverride {
                    agent: AgentOverride {
                        prompt: PromptOverride {
                            prompt: request.prompt,
                        },
                        first_message: request.first_message,
                    },
                },
            },
        }
    }
}

/// Response of the outbound-call endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OutboundCallResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default, rename = "callSid")]
    pub call_sid: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Conversation
// ════════════════════════════════════════════════════════════════════════════════

/// Conversation as returned by `GET /v1/convai/conversations/{id}` and in
/// the `data` field of a post-call webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationData {
    pub conversation_id: String,
    pub status: String,
    #[serde(default)]
    pub transcript: Vec<WireTurn>,
    #[serde(default)]
    pub metadata: Option<ConversationMetadata>,
    #[serde(default)]
    pub analysis: Option<ConversationAnalysis>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTurn {
    pub role: String,
    /// Null for tool-call turns.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time_in_call_secs: Option<f64>,
    #[serde(default)]
    pub tool_calls: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default)]
    pub call_duration_secs: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationAnalysis {
    #[serde(default)]
    pub data_collection_results: HashMap<String, DataCollectionResult>,
    #[serde(default)]
    pub transcript_summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataCollectionResult {
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ConversationData {
    /// Converts into the port representation.
    ///
    /// Turns without text or with an unknown role are dropped; null data
    /// collection values are skipped.
    pub fn into_outcome(self) -> Result<ConversationOutcome, WebhookError> {
        let conversation_id = ConversationId::new(self.conversation_id)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let transcript: Transcript = self
            .transcript
            .into_iter()
            .map(WireTurn::into_turn)
            .collect();

        let duration_secs = self
            .metadata
            .and_then(|m| m.call_duration_secs)
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d.round() as u32);

        let (summary, data_collection) = match self.analysis {
            Some(analysis) => {
                let values = analysis
                    .data_collection_results
                    .into_iter()
                    .filter_map(|(key, result)| value_as_text(result.value).map(|v| (key, v)))
                    .collect();
                let summary = analysis.transcript_summary.filter(|s| !s.trim().is_empty());
                (summary, values)
            }
            None => (None, BTreeMap::new()),
        };

        Ok(ConversationOutcome {
            conversation_id,
            status: ConversationStatus::from_vendor(&self.status),
            transcript,
            duration_secs,
            summary,
            data_collection,
        })
    }
}

impl WireTurn {
    fn into_turn(self) -> TranscriptTurn {
        TranscriptTurn {
            role: Role::from(self.role),
            message: self.message.unwrap_or_default(),
            time_in_call_secs: self.time_in_call_secs,
            tool_calls: self.tool_calls.filter(|calls| !calls.is_null()),
        }
    }
}

fn value_as_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct WebhookEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Parses an (already authenticated) webhook body.
pub fn parse_webhook(payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    let envelope: WebhookEnvelope = serde_json::from_slice(payload)
        .map_err(|e| WebhookError::ParseError(e.to_string()))?;

    if envelope.event_type != POST_CALL_TRANSCRIPTION {
        return Ok(WebhookEvent::Other(envelope.event_type));
    }

    let data: ConversationData = serde_json::from_value(envelope.data)
        .map_err(|e| WebhookError::ParseError(e.to_string()))?;
    Ok(WebhookEvent::PostCallTranscription(data.into_outcome()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transcription_payload() -> serde_json::Value {
        json!({
            "type": "post_call_transcription",
            "event_timestamp": 1739537297,
            "data": {
                "agent_id": "agent_123",
                "conversation_id": "conv_abc",
                "status": "done",
                "transcript": [
                    {"role": "agent", "message": "On a scale of 1 to 10, how satisfied are you?", "time_in_call_secs": 2},
                    {"role": "user", "message": "Nine.", "time_in_call_secs": 6.5},
                    {"role": "agent", "message": null, "tool_calls": [{"tool_name": "end_call"}]},
                    {"role": "user", "message": "  "},
                    {"role": "system", "message": "Call transferred"}
                ],
                "metadata": {"call_duration_secs": 87.6, "start_time_unix_secs": 1739537200},
                "analysis": {
                    "call_successful": "success",
                    "transcript_summary": "Customer was very satisfied.",
                    "data_collection_results": {
                        "q1": {"data_collection_id": "q1", "value": "9", "rationale": "said nine"},
                        "q3": {"data_collection_id": "q3", "value": 10},
                        "q5": {"data_collection_id": "q5", "value": null}
                    }
                }
            }
        })
    }

    #[test]
    fn outbound_body_carries_overrides_and_customer_name() {
        let body = OutboundCallBody::new(
            "agent_123",
            "phnum_456",
            OutboundCallRequest {
                to_number: "+14155550100".to_string(),
                customer_name: "Ada".to_string(),
                prompt: "You are Sam".to_string(),
                first_message: "Hi Ada".to_string(),
            },
        );

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["agent_id"], "agent_123");
        assert_eq!(value["to_number"], "+14155550100");
        let client_data = &value["conversation_initiation_client_data"];
        assert_eq!(client_data["dynamic_variables"]["customer_name"], "Ada");
        let agent = &client_data["conversation_config_override"]["agent"];
        assert_eq!(agent["prompt"]["prompt"], "You are Sam");
        assert_eq!(agent["first_message"], "Hi Ada");
    }

    #[test]
    fn outbound_response_reads_call_sid() {
        let response: OutboundCallResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Call initiated",
            "conversation_id": "conv_abc",
            "callSid": "CA123"
        }))
        .unwrap();

        assert!(response.success);
        assert_eq!(response.call_sid.as_deref(), Some("CA123"));
    }

    #[test]
    fn parse_transcription_webhook() {
        let payload = serde_json::to_vec(&transcription_payload()).unwrap();

        let WebhookEvent::PostCallTranscription(outcome) = parse_webhook(&payload).unwrap() else {
            panic!("expected transcription event");
        };

        assert_eq!(outcome.conversation_id.as_str(), "conv_abc");
        assert_eq!(outcome.status, ConversationStatus::Done);
        assert_eq!(outcome.duration_secs, Some(88));
        assert_eq!(outcome.summary.as_deref(), Some("Customer was very satisfied."));
        assert_eq!(outcome.transcript.len(), 5);
        assert_eq!(outcome.transcript.turns()[1].message, "Nine.");
        assert_eq!(outcome.transcript.turns()[1].time_in_call_secs, Some(6.5));
        let tool_turn = &outcome.transcript.turns()[2];
        assert_eq!(tool_turn.role, Role::Agent);
        assert!(!tool_turn.has_speech());
        assert_eq!(tool_turn.tool_calls.as_ref().unwrap()[0]["tool_name"], "end_call");
        assert_eq!(outcome.transcript.turns()[3].message, "  ");
        assert_eq!(outcome.transcript.turns()[4].role, Role::Other("system".to_string()));
        assert_eq!(outcome.data_collection.get("q1").map(String::as_str), Some("9"));
        assert_eq!(outcome.data_collection.get("q3").map(String::as_str), Some("10"));
        assert!(!outcome.data_collection.contains_key("q5"));
    }

    #[test]
    fn other_event_types_are_passed_through() {
        let payload = br#"{"type":"post_call_audio","data":{"conversation_id":"conv_abc"}}"#;
        assert_eq!(
            parse_webhook(payload).unwrap(),
            WebhookEvent::Other("post_call_audio".to_string())
        );
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        assert!(matches!(
            parse_webhook(b"not json"),
            Err(WebhookError::ParseError(_))
        ));
        assert!(matches!(
            parse_webhook(br#"{"type":"post_call_transcription","data":{"status":"done"}}"#),
            Err(WebhookError::ParseError(_))
        ));
    }

    #[test]
    fn missing_analysis_yields_empty_data_collection() {
        let data: ConversationData = serde_json::from_value(json!({
            "conversation_id": "conv_abc",
            "status": "failed",
            "transcript": []
        }))
        .unwrap();

        let outcome = data.into_outcome().unwrap();
        assert_eq!(outcome.status, ConversationStatus::Failed);
        assert!(outcome.data_collection.is_empty());
        assert!(outcome.transcript.is_empty());
        assert_eq!(outcome.duration_secs, None);
    }
}
