use crate::error::BilanError;
use crate::providers::{cap_body, request_error, response_error, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
const BODY_LIMIT: usize = 20_000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Generic chat-completions REST client for Grok-style endpoints.
///
/// Same wire format as the OpenAI family but pointed at an arbitrary
/// base URL, with a tighter body limit.
pub struct RestGenerator {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl RestGenerator {
    pub fn new(api_key: &str, base_url: Option<&str>, model: &str) -> Result<Self, BilanError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| request_error("rest", e))?;
        Ok(RestGenerator {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            model: model.to_string(),
        })
    }
}

fn build_request(model: &str, instructions: &str, body: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            Message {
                role: "system",
                content: instructions.to_string(),
            },
            Message {
                role: "user",
                content: cap_body(body, BODY_LIMIT),
            },
        ],
        temperature: 0.1,
    }
}

impl TextGenerator for RestGenerator {
    fn name(&self) -> &str {
        "rest"
    }

    fn generate(&self, instructions: &str, body: &str) -> Result<String, BilanError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = build_request(&self.model, instructions, body);

        tracing::debug!(model = %self.model, url = %url, "calling REST chat completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| request_error(self.name(), e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(response_error(
                self.name(),
                format!("HTTP {}: {}", status, detail),
            ));
        }

        let parsed: CompletionResponse =
            response.json().map_err(|e| request_error(self.name(), e))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| response_error(self.name(), "empty completion"))
    }
}
