use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::chat::conversation_state::Message;
use crate::error::RecommendError;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.7;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiClient {
    api_key: String,
    http: Client,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Sends the full ordered history (system message included) and returns
    /// the trimmed completion text. Never retried; the caller decides what
    /// to surface.
    pub async fn complete(&self, messages: &[Message]) -> Result<String, RecommendError> {
        let request = ChatRequest {
            model: MODEL,
            messages,
            temperature: TEMPERATURE,
        };

        debug!("sending {} messages to {}", messages.len(), OPENAI_API_URL);

        let response = self
            .http
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("chat completion failed with status {}", status);
            let body = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            };
            return Err(RecommendError::Remote { status, body });
        }

        // a 2xx body that does not decode counts as an empty completion
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|_| RecommendError::EmptyResponse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(RecommendError::EmptyResponse)
    }
}
