//! Chat completion trait for generative model calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instructions that frame the model's behavior.
    System,
    /// Content authored by the end user (or the pipeline on their behalf).
    User,
    /// Content authored by the model.
    Assistant,
}

/// A single `(role, content)` conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author role.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A generative model that turns a message sequence into completion text.
///
/// Implementations wrap a specific chat completion backend. The model
/// identifier is fixed by the implementation's configuration; callers only
/// choose messages and sampling temperature.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Request a completion for the given messages.
    ///
    /// Returns the first completion's text verbatim.
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String>;
}
