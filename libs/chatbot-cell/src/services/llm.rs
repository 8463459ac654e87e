use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use shared_config::AppConfig;

use crate::models::{ChatError, ChatMessage};
use crate::services::assistant::SYSTEM_PROMPT;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint. Optional: when
/// no key is configured the assistant answers from the script instead.
pub struct LlmClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.openai_api_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
        }
    }

    /// Complete the conversation. `history` is the stored transcript in
    /// ascending order, user message included.
    pub async fn complete(&self, history: &[ChatMessage]) -> Result<String, ChatError> {
        let mut messages = vec![json!({ "role": "system", "content": SYSTEM_PROMPT })];
        for msg in history {
            let role = if msg.sender == "user" { "user" } else { "assistant" };
            messages.push(json!({ "role": role, "content": msg.message }));
        }

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({
                "model": "gpt-4",
                "messages": messages,
                "max_tokens": 200,
                "temperature": 0.7,
            }))
            .send()
            .await
            .map_err(|e| ChatError::Llm(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Llm(format!(
                "completion failed ({}): {}",
                status, message
            )));
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| ChatError::Llm(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::Llm("completion carries no content".to_string()))
    }
}
