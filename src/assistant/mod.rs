//! Conversational scheduling assistant.
//!
//! The gateway forwards one instruction at a time to a chat-completions
//! endpoint together with a system prompt describing the roster and the
//! viewed day's schedule. The endpoint owns any actual schedule change;
//! the app parses nothing out of the reply except the literal `OK`,
//! which means "schedule changed, reload the day".

mod client;
mod prompts;
mod widget;

pub use client::HttpChatGateway;
pub use prompts::build_system_prompt;
pub use widget::{Bubble, ChatWidget, RELOAD_SENTINEL};

use async_trait::async_trait;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("no assistant API key configured")]
    NoApiKey,
    #[error("assistant request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("assistant endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
    #[error("malformed assistant reply: {0}")]
    MalformedReply(String),
    #[error("assistant context unavailable: {0}")]
    Context(#[from] StoreError),
}

/// One-message-at-a-time boundary to the assistant. No conversation
/// state lives on either side of this trait.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Forward one free-text instruction for the viewed day and return
    /// the assistant's reply text.
    async fn send(&self, text: &str, date: &str) -> Result<String, AssistantError>;

    /// Whether sends can possibly succeed. Lets the UI report the
    /// assistant as unavailable without a round trip.
    fn is_configured(&self) -> bool {
        true
    }
}
