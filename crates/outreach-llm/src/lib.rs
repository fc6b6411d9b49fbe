//! Chat-model email generation.
//!
//! Wraps an OpenAI-compatible chat-completion API behind the [`ChatModel`]
//! trait and builds persona-voiced outreach drafts from the concrete facts
//! the enrichment stages discovered.

pub mod client;
pub mod error;
pub mod followup;
pub mod generator;
pub mod prompt;

use async_trait::async_trait;

pub use client::LlmClient;
pub use error::LlmError;
pub use followup::{follow_up_email, MAX_FOLLOW_UPS};
pub use generator::{generate_email, generate_icebreaker};
pub use prompt::{parse_email_draft, EmailDraft};

/// Capability interface over a chat-completion model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one system+user exchange and return the raw completion text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}
