use crate::providers::ProviderKind;

/// Bounds of the configurable text-length limit.
pub const MIN_TEXT_LENGTH: usize = 50_000;
pub const MAX_TEXT_LENGTH: usize = 200_000;
pub const TEXT_LENGTH_STEP: usize = 10_000;
pub const DEFAULT_TEXT_LENGTH: usize = 120_000;

/// Model choices offered for the OpenAI provider.
pub const OPENAI_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-3.5-turbo"];

/// Runtime configuration. Credentials come from the environment or
/// direct user entry; never from source.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Provider base URL override; each provider has its own default.
    pub base_url: Option<String>,
    /// Maximum characters of document text passed downstream.
    pub max_text_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            provider: ProviderKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            max_text_length: DEFAULT_TEXT_LENGTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_key: std::env::var("BILAN_API_KEY").unwrap_or(default.api_key),
            provider: std::env::var("BILAN_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.provider),
            model: std::env::var("BILAN_MODEL").unwrap_or(default.model),
            base_url: std::env::var("BILAN_API_BASE_URL").ok(),
            max_text_length: std::env::var("BILAN_MAX_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(clamp_text_length)
                .unwrap_or(default.max_text_length),
        }
    }
}

/// Snap a requested text-length bound to the supported range: clamped
/// to [50_000, 200_000] and rounded to the nearest 10_000 step.
pub fn clamp_text_length(requested: usize) -> usize {
    let clamped = requested.clamp(MIN_TEXT_LENGTH, MAX_TEXT_LENGTH);
    let rounded = (clamped + TEXT_LENGTH_STEP / 2) / TEXT_LENGTH_STEP * TEXT_LENGTH_STEP;
    rounded.clamp(MIN_TEXT_LENGTH, MAX_TEXT_LENGTH)
}
