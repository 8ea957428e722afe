//! Chat transcript state and the reload sentinel.

use std::sync::Arc;

use super::ChatGateway;

/// The one reply the app acts on. Byte-exact: `"ok"`, `"OK "`, or an
/// `OK` buried in a sentence do not count.
pub const RELOAD_SENTINEL: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bubble {
    User(String),
    Assistant(String),
    /// A failed send, rendered inline. Failures never escape the widget.
    Error(String),
}

/// Chronological chat transcript over a gateway. Holds no conversation
/// state beyond the rendered bubbles; every send stands alone.
pub struct ChatWidget {
    gateway: Arc<dyn ChatGateway>,
    bubbles: Vec<Bubble>,
}

impl ChatWidget {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            bubbles: Vec::new(),
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Send one message for the viewed day. Returns whether the caller
    /// should reload the day's shifts and redraw.
    pub async fn send(&mut self, text: &str, date: &str) -> bool {
        self.bubbles.push(Bubble::User(text.to_string()));
        match self.gateway.send(text, date).await {
            Ok(reply) => {
                let reload = reply == RELOAD_SENTINEL;
                self.bubbles.push(Bubble::Assistant(reply));
                reload
            }
            Err(err) => {
                self.bubbles.push(Bubble::Error(err.to_string()));
                false
            }
        }
    }
}
