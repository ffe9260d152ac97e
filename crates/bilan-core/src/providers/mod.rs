pub mod gemini;
pub mod openai;
pub mod rest;

use crate::config::Config;
use crate::error::BilanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability interface over the generative text providers: produce
/// text given an instruction string and a document body, or fail with
/// a typed error. Calls are never retried.
pub trait TextGenerator: Send + Sync {
    /// Provider name (for diagnostics and error messages).
    fn name(&self) -> &str;

    fn generate(&self, instructions: &str, body: &str) -> Result<String, BilanError>;
}

/// The supported provider families, selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Rest,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Rest => write!(f, "rest"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = BilanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            "rest" => Ok(ProviderKind::Rest),
            other => Err(BilanError::UnknownProvider(other.to_string())),
        }
    }
}

/// Build the configured provider client.
///
/// The credential is checked here, before any network call.
pub fn build_generator(config: &Config) -> Result<Box<dyn TextGenerator>, BilanError> {
    if config.api_key.trim().is_empty() {
        return Err(BilanError::MissingApiKey);
    }

    let generator: Box<dyn TextGenerator> = match config.provider {
        ProviderKind::OpenAi => Box::new(openai::OpenAiGenerator::new(
            &config.api_key,
            config.base_url.as_deref(),
            &config.model,
        )?),
        ProviderKind::Gemini => Box::new(gemini::GeminiGenerator::new(
            &config.api_key,
            config.base_url.as_deref(),
            &config.model,
        )?),
        ProviderKind::Rest => Box::new(rest::RestGenerator::new(
            &config.api_key,
            config.base_url.as_deref(),
            &config.model,
        )?),
    };

    Ok(generator)
}

/// Cap the document body sent to a provider. Each provider applies its
/// own fixed limit regardless of the configured maximum text length.
pub(crate) fn cap_body(body: &str, limit: usize) -> String {
    if body.chars().count() <= limit {
        body.to_string()
    } else {
        body.chars().take(limit).collect()
    }
}

pub(crate) fn request_error(provider: &str, message: impl fmt::Display) -> BilanError {
    BilanError::ProviderRequest {
        provider: provider.to_string(),
        message: message.to_string(),
    }
}

pub(crate) fn response_error(provider: &str, message: impl fmt::Display) -> BilanError {
    BilanError::ProviderResponse {
        provider: provider.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!(" rest ".parse::<ProviderKind>().unwrap(), ProviderKind::Rest);
        assert!("mistral".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_cap_body_short_unchanged() {
        assert_eq!(cap_body("bonjour", 100), "bonjour");
    }

    #[test]
    fn test_cap_body_truncates_on_char_boundary() {
        let body = "é".repeat(50);
        let capped = cap_body(&body, 10);
        assert_eq!(capped.chars().count(), 10);
    }

    #[test]
    fn test_missing_api_key_rejected_before_any_call() {
        let config = Config {
            api_key: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            build_generator(&config),
            Err(BilanError::MissingApiKey)
        ));
    }
}
