//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use gluelock_config::ConfigError;
use gluelock_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_READY: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Glue API")]
    #[diagnostic(
        code(gluelock::connection_failed),
        help("Check network access and the configured url.\n{message}")
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(gluelock::auth_failed),
        help("Verify username and password (GLUE_USERNAME / GLUE_PASSWORD).")
    )]
    AuthFailed,

    #[error("No {field} configured")]
    #[diagnostic(
        code(gluelock::no_credentials),
        help(
            "Set {field} in {path},\n\
             or export GLUE_USERNAME / GLUE_PASSWORD."
        )
    )]
    NoCredentials { field: &'static str, path: String },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Lock is not ready: {missing} is not resolved")]
    #[diagnostic(
        code(gluelock::not_ready),
        help("Run: gluelock hubs, then pass --hub-id / --lock-id or set them in the config.")
    )]
    NotReady { missing: &'static str },

    #[error("No reading available")]
    #[diagnostic(code(gluelock::unavailable))]
    Unavailable,

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(gluelock::api_error))]
    ApiError { message: String },

    #[error("Operation '{operation}' is not supported")]
    #[diagnostic(code(gluelock::unsupported))]
    Unsupported { operation: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gluelock::validation))]
    Validation { field: String, reason: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(code(gluelock::config_exists), help("Pass --force to overwrite it."))]
    ConfigExists { path: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(gluelock::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode output: {0}")]
    #[diagnostic(code(gluelock::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotReady { .. } | Self::Unavailable => exit_code::NOT_READY,
            Self::Unsupported { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Authentication { .. }
            | CoreError::Network {
                status: Some(401 | 403),
                ..
            } => CliError::AuthFailed,
            CoreError::Network { message, .. } => CliError::ConnectionFailed { message },
            CoreError::Api { message } | CoreError::Decode { message } => {
                CliError::ApiError { message }
            }
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Resolution { missing } => CliError::NotReady { missing },
            CoreError::ReadingUnavailable => CliError::Unavailable,
            CoreError::Unsupported { operation } => CliError::Unsupported { operation },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::MissingCredentials { field } => CliError::NoCredentials {
                field,
                path: gluelock_config::config_path().display().to_string(),
            },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth_exit_code() {
        let err: CliError = CoreError::Network {
            message: "HTTP 401".into(),
            status: Some(401),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn unresolved_device_maps_to_not_ready() {
        let err: CliError = CoreError::Resolution { missing: "lock id" }.into();
        assert_eq!(err.exit_code(), exit_code::NOT_READY);
        assert!(err.to_string().contains("lock id"));
    }
}
