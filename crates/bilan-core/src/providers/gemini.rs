use crate::error::BilanError;
use crate::providers::{cap_body, request_error, response_error, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const BODY_LIMIT: usize = 30_000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Google Gemini generateContent client.
pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiGenerator {
    pub fn new(api_key: &str, base_url: Option<&str>, model: &str) -> Result<Self, BilanError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| request_error("gemini", e))?;
        Ok(GeminiGenerator {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            model: model.to_string(),
        })
    }
}

fn build_request(instructions: &str, body: &str) -> GenerateRequest {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: instructions.to_string(),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: cap_body(body, BODY_LIMIT),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.1,
            max_output_tokens: 2000,
        },
    }
}

fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()
        .map(|p| p.text.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, instructions: &str, body: &str) -> Result<String, BilanError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let request = build_request(instructions, body);

        tracing::debug!(model = %self.model, "calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
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

        let parsed: GenerateResponse =
            response.json().map_err(|e| request_error(self.name(), e))?;

        extract_text(parsed).ok_or_else(|| response_error(self.name(), "no candidate text"))
    }
}
