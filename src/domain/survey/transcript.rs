//! Conversation transcripts as delivered by the voice platform.

use serde::{Deserialize, Serialize};

/// Speaker of a transcript turn.
///
/// Roles other than `agent` and `user` are kept under their original name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Agent,
    User,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Agent => "agent",
            Role::User => "user",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        match name.as_str() {
            "agent" => Role::Agent,
            "user" => Role::User,
            _ => Role::Other(name),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: Role,
    /// Empty for turns that carried no speech, such as tool calls.
    #[serde(default)]
    pub message: String,
    /// Seconds since the call connected, when the platform reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_call_secs: Option<f64>,
    /// Tool invocations reported on this turn, as sent by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<serde_json::Value>,
}

impl TranscriptTurn {
    pub fn agent(message: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            message: message.into(),
            time_in_call_secs: None,
            tool_calls: None,
        }
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
            time_in_call_secs: None,
            tool_calls: None,
        }
    }

    pub fn at(mut self, secs: f64) -> Self {
        self.time_in_call_secs = Some(secs);
        self
    }

    /// True when the turn carries words someone said.
    pub fn has_speech(&self) -> bool {
        !self.message.trim().is_empty()
    }
}

/// Ordered list of turns for one conversation, stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<TranscriptTurn>);

impl Transcript {
    pub fn new(turns: Vec<TranscriptTurn>) -> Self {
        Self(turns)
    }

    pub fn turns(&self) -> &[TranscriptTurn] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<TranscriptTurn> for Transcript {
    fn from_iter<I: IntoIterator<Item = TranscriptTurn>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
