//! HTTP gateway to an OpenAI-style chat-completions endpoint.
//!
//! Uses reqwest with Bearer auth. One request per message: the system
//! prompt is rebuilt from the stores each time, so the assistant always
//! sees the schedule as it is on disk.

use async_trait::async_trait;

use crate::config::AssistantConfig;
use crate::store::{RosterStore, ShiftStore};

use super::prompts::build_system_prompt;
use super::{AssistantError, ChatGateway};

pub struct HttpChatGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    roster: RosterStore,
    store: ShiftStore,
}

impl HttpChatGateway {
    pub fn new(config: &AssistantConfig, roster: RosterStore, store: ShiftStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            roster,
            store,
        }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, text: &str, date: &str) -> Result<String, AssistantError> {
        let key = self.api_key.as_deref().ok_or(AssistantError::NoApiKey)?;

        let workers = self.roster.list()?;
        let shifts = self.store.list(Some(date))?;
        let system = build_system_prompt(date, &workers, &shifts);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": text },
            ],
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistantError::Endpoint { status, body });
        }

        let json: serde_json::Value = resp.json().await?;
        let reply = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| AssistantError::MalformedReply(json.to_string()))?;

        Ok(reply.to_string())
    }
}
