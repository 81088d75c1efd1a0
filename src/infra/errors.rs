// src/infra/errors.rs — Error types for Tincture

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TinctureError {
    // Caller errors (never retried, no I/O performed)
    #[error("{0}")]
    Validation(String),

    // Upstream errors (retried by the completion client)
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("No response from API")]
    EmptyOutput,

    #[error("No valid color found in response")]
    MissingColor { output: String },

    // Setup
    #[error("No API key found. Set {env} to a valid key.")]
    NoApiKey { env: String },

    #[error("Configuration error: {0}")]
    Config(String),

    // Store errors (never retried)
    #[error("Store error: {0}")]
    Store(anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification used for logging and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Upstream,
    Store,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Store => "store",
            ErrorKind::Internal => "internal",
        }
    }
}

impl TinctureError {
    pub fn validation(message: impl Into<String>) -> Self {
        TinctureError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TinctureError::Validation(_) => ErrorKind::Validation,
            TinctureError::Provider { .. }
            | TinctureError::EmptyOutput
            | TinctureError::MissingColor { .. } => ErrorKind::Upstream,
            TinctureError::Store(_) => ErrorKind::Store,
            TinctureError::NoApiKey { .. }
            | TinctureError::Config(_)
            | TinctureError::Io(_)
            | TinctureError::Other(_) => ErrorKind::Internal,
        }
    }

    /// Upstream failures are worth another attempt; everything else is final.
    pub fn is_retriable(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = TinctureError::validation("Text is required");
        assert_eq!(err.to_string(), "Text is required");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_upstream_errors_are_retriable() {
        assert!(TinctureError::EmptyOutput.is_retriable());
        assert!(TinctureError::MissingColor {
            output: "no color".into()
        }
        .is_retriable());
        assert!(TinctureError::Provider {
            provider: "openai".into(),
            message: "HTTP 500".into(),
        }
        .is_retriable());
    }

    #[test]
    fn test_store_errors_are_not_retriable() {
        let err = TinctureError::Store(anyhow::anyhow!("disk full"));
        assert_eq!(err.kind(), ErrorKind::Store);
        assert!(!err.is_retriable());
        assert_eq!(err.to_string(), "Store error: disk full");
    }

    #[test]
    fn test_upstream_messages() {
        assert_eq!(TinctureError::EmptyOutput.to_string(), "No response from API");
        assert_eq!(
            TinctureError::MissingColor {
                output: String::new()
            }
            .to_string(),
            "No valid color found in response"
        );
    }
}
