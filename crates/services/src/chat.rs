use chrono::{DateTime, Utc};
use std::sync::Arc;

use fanpulse_core::Clock;
use fanpulse_core::model::Session;

use crate::api::FanApi;
use crate::error::ChatError;

/// Who said a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAuthor {
    Fan,
    Assistant,
}

/// One line of the assistant transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Free-text assistant exchange, kept as a local transcript.
pub struct ChatService {
    api: Arc<dyn FanApi>,
    clock: Clock,
    transcript: Vec<ChatMessage>,
}

impl ChatService {
    #[must_use]
    pub fn new(api: Arc<dyn FanApi>, clock: Clock) -> Self {
        Self {
            api,
            clock,
            transcript: Vec::new(),
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send a message and append the assistant's reply to the transcript.
    ///
    /// The fan's line stays in the transcript even when the backend call
    /// fails, so the conversation reads naturally across a retry.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for a blank message (nothing is
    /// sent or recorded) and `ChatError::Api` when the exchange fails.
    pub async fn send(&mut self, session: &Session, text: &str) -> Result<String, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.transcript.push(ChatMessage {
            author: ChatAuthor::Fan,
            body: text.to_string(),
            sent_at: self.clock.now(),
        });

        let reply = self.api.chat(session.user_id(), text).await?;
        self.transcript.push(ChatMessage {
            author: ChatAuthor::Assistant,
            body: reply.response.clone(),
            sent_at: self.clock.now(),
        });
        Ok(reply.response)
    }

    /// Forget the conversation so far.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }
}
