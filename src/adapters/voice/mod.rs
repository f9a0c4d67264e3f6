//! Voice platform adapters.
//!
//! Implements the `VoiceProvider` port for the conversational-agent
//! platform, including:
//! - Outbound survey calls with prompt overrides
//! - Conversation lookup for manual sync
//! - Post-call webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Deliveries older than 30 minutes are rejected
//! - The API key and webhook secret are held in `secrecy::Secret`

mod elevenlabs_adapter;
mod mock_voice_provider;
mod wire_types;

pub use elevenlabs_adapter::{ElevenLabsConfig, ElevenLabsVoiceProvider};
pub use mock_voice_provider::MockVoiceProvider;
