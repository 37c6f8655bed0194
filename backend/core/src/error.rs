use thiserror::Error;

/// Top-level error type for the Remitex runtime.
#[derive(Debug, Error)]
pub enum RemitexError {
    #[error("upload rejected: {0}")]
    UploadRejected(String),

    #[error("document produced no extractable text")]
    EmptyDocument,

    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("LLM provider error ({provider}): {message}")]
    LlmError { provider: String, message: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
