#[derive(Debug, thiserror::Error)]
pub enum BilanError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no text content found in PDF")]
    EmptyDocument,

    #[error("no API key configured. Set BILAN_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("unknown provider '{0}'. Available: openai, gemini, rest")]
    UnknownProvider(String),

    #[error("{provider} request failed: {message}")]
    ProviderRequest { provider: String, message: String },

    #[error("{provider} returned an unusable response: {message}")]
    ProviderResponse { provider: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
