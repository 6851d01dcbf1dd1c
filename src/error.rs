use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuardError>;

/// Whether a provider failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Throttling, timeouts, connection resets.
    Transient,
    /// Auth failures, missing resources, malformed responses.
    Permanent,
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Permanent => write!(f, "permanent"),
        }
    }
}

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Provider error during {operation} ({kind}): {message}")]
    Provider {
        operation: String,
        kind: ProviderErrorKind,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Inventory error in {path}: {message}")]
    Inventory { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GuardError {
    pub fn provider(
        operation: impl Into<String>,
        kind: ProviderErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            operation: operation.into(),
            kind,
            message: message.into(),
        }
    }

    /// Only transient provider failures may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Provider {
                kind: ProviderErrorKind::Transient,
                ..
            }
        )
    }

    /// Fatal errors mean "audit not performed"; 1 is reserved for failed checks.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
