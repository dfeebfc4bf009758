//! Fashion assistant chat
//!
//! Prompts are forwarded to a remote relay endpoint that talks to the
//! language model. The conversation never surfaces an error: a failed relay
//! call turns into an apology from the bot.

use crate::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use shared::models::{ChatMessage, ChatRequest, ChatResponse};

pub const GREETING: &str =
    "Hello! I'm your fashion assistant for M3 Outfit. How can I help you find the perfect look today?";
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't get a response right now. Please try again later.";

/// Remote completion endpoint
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn complete(&self, prompt: &str) -> ClientResult<String>;
}

/// Relay over HTTP: `POST {"prompt"}` → `{"response"}`
#[derive(Debug, Clone)]
pub struct HttpChatRelay {
    client: Client,
    endpoint: String,
}

impl HttpChatRelay {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.chat_endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatRelay for HttpChatRelay {
    async fn complete(&self, prompt: &str) -> ClientResult<String> {
        let body = ChatRequest {
            prompt: prompt.to_string(),
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Chat(format!("HTTP error! status: {}", status.as_u16())));
        }
        let reply: ChatResponse = response.json().await?;
        Ok(reply.response)
    }
}

/// Conversation state for the chat widget
pub struct ChatAssistant<R: ChatRelay> {
    relay: R,
    history: Vec<ChatMessage>,
}

impl<R: ChatRelay> ChatAssistant<R> {
    pub fn new(relay: R) -> Self {
        Self {
            relay,
            history: vec![ChatMessage::bot(GREETING)],
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send a message and append the reply. Blank input is ignored and
    /// returns `None`; otherwise the bot's reply (or the apology) is returned.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        self.history.push(ChatMessage::user(text));

        let reply = match self.relay.complete(text).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "Fashion assistant relay failed");
                FALLBACK_REPLY.to_string()
            }
        };
        self.history.push(ChatMessage::bot(reply));
        self.history.last()
    }
}
