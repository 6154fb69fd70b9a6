// ── Core error types ──
//
// Errors surfaced by gluelock-core. Background paths log and swallow
// these; foreground paths (commands, host getters) hand them to the
// caller. The `From<gluelock_api::Error>` impl translates transport
// failures into this taxonomy.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Construction ─────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Remote API ───────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// HTTP status code (if the server answered at all).
        status: Option<u16>,
    },

    /// The server rejected the credentials (401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String, status: Option<u16> },

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },

    // ── Device state ─────────────────────────────────────────────────
    #[error("Device not ready: {missing} is not resolved")]
    Resolution { missing: &'static str },

    #[error("Reading unavailable")]
    ReadingUnavailable,

    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },
}

impl CoreError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status code, when the error came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } | Self::Authentication { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<gluelock_api::Error> for CoreError {
    fn from(err: gluelock_api::Error) -> Self {
        if err.is_unauthorized() {
            return CoreError::Authentication {
                message: err.to_string(),
                status: err.status(),
            };
        }
        match err {
            gluelock_api::Error::Transport(ref e) => CoreError::Network {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            gluelock_api::Error::Http { status, path, .. } => CoreError::Network {
                message: format!("HTTP {status} from {path}"),
                status: Some(status),
            },
            gluelock_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            gluelock_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
