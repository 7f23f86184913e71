//! Transport-agnostic reply seam
//!
//! Handlers talk to the chat only through [`ChatReply`], so they can run
//! against Telegram in production and a recorder in tests.

use anyhow::Result;
use async_trait::async_trait;

/// A selectable button: visible label plus opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown on the button
    pub label: String,
    /// Payload delivered back on press
    pub payload: String,
}

impl Choice {
    /// Create a button.
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Chat-side operations needed to answer one event.
#[async_trait]
pub trait ChatReply: Send + Sync {
    /// Send a new plain text message.
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Send a new message with one button per row.
    async fn send_choices(&self, text: &str, choices: &[Choice]) -> Result<()>;

    /// Replace the text of the message the event came from.
    async fn edit_text(&self, text: &str) -> Result<()>;
}
