use crate::error::BilanError;
use crate::providers::{cap_body, request_error, response_error, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const BODY_LIMIT: usize = 30_000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI-style chat-completions client.
pub struct OpenAiGenerator {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str, base_url: Option<&str>, model: &str) -> Result<Self, BilanError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| request_error("openai", e))?;
        Ok(OpenAiGenerator {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            model: model.to_string(),
        })
    }
}

fn build_request(model: &str, instructions: &str, body: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: instructions.to_string(),
            },
            ChatMessage {
                role: "user",
                content: cap_body(body, BODY_LIMIT),
            },
        ],
        max_tokens: 2000,
        temperature: 0.1,
    }
}

fn extract_content(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    fn generate(&self, instructions: &str, body: &str) -> Result<String, BilanError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = build_request(&self.model, instructions, body);

        tracing::debug!(model = %self.model, "calling OpenAI chat completions");

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

        let parsed: ChatResponse = response.json().map_err(|e| request_error(self.name(), e))?;

        extract_content(parsed).ok_or_else(|| response_error(self.name(), "empty completion"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = build_request("gpt-4o-mini", "Analyse ce rapport.", "=== [PAGE 1] ===\nCA: 100");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["temperature"], 0.1);
    }

    #[test]
    fn test_body_capped() {
        let body = "x".repeat(BODY_LIMIT + 500);
        let request = build_request("gpt-4o-mini", "instr", &body);
        assert_eq!(request.messages[1].content.chars().count(), BODY_LIMIT);
    }

    #[test]
    fn test_extract_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Résumé.  "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(response).unwrap(), "Résumé.");
    }

    #[test]
    fn test_empty_choices_is_none() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(extract_content(response).is_none());
    }

    #[test]
    fn test_null_content_is_none() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(extract_content(response).is_none());
    }
}
