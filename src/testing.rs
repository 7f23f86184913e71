//! Testing helpers.
//!
//! [`RecordingReply`] stands in for the chat transport and captures every
//! outgoing message in order.

use crate::bot::reply::{ChatReply, Choice};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// One captured transport operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    /// New plain message
    Text(String),
    /// New message with buttons
    Choices(String, Vec<Choice>),
    /// Edit of the originating message
    Edit(String),
}

/// A `ChatReply` that records instead of sending.
#[derive(Default)]
pub struct RecordingReply {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingReply {
    /// Everything sent so far.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn push(&self, item: Sent) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| anyhow!("recorder poisoned"))?
            .push(item);
        Ok(())
    }
}

#[async_trait]
impl ChatReply for RecordingReply {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.push(Sent::Text(text.to_string()))
    }

    async fn send_choices(&self, text: &str, choices: &[Choice]) -> Result<()> {
        self.push(Sent::Choices(text.to_string(), choices.to_vec()))
    }

    async fn edit_text(&self, text: &str) -> Result<()> {
        self.push(Sent::Edit(text.to_string()))
    }
}
