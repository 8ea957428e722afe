use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Directory holding roster.json, shifts.json, and abilities.json.
    pub data_dir: PathBuf,
    /// Static frontend files served at `/`.
    pub assets_dir: PathBuf,
    pub assistant: AssistantConfig,
}

/// Chat-model endpoint settings. Without an API key the assistant
/// endpoints report the assistant as unavailable; everything else works.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("SHIFTDESK_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8320".to_string());
        let listen_addr = listen_addr
            .parse()
            .with_context(|| format!("invalid SHIFTDESK_LISTEN_ADDR: {listen_addr}"))?;

        let data_dir = std::env::var("SHIFTDESK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let assets_dir = std::env::var("SHIFTDESK_ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));

        let assistant = AssistantConfig {
            endpoint: std::env::var("SHIFTDESK_ASSISTANT_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            model: std::env::var("SHIFTDESK_ASSISTANT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_key: std::env::var("SHIFTDESK_ASSISTANT_KEY").ok(),
        };

        Ok(Self {
            listen_addr,
            data_dir,
            assets_dir,
            assistant,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".shiftdesk").join("data"))
        .unwrap_or_else(|| PathBuf::from(".shiftdesk-data"))
}
