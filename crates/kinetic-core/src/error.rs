// ── Core error types ──
//
// Errors surfaced to the binary. The views never show these to the user
// (they render a fixed message); they exist for startup failures and for
// log output. `From<kinetic_api::Error>` folds transport-level detail into
// a handful of variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Kinetic credentials not configured: missing {field}")]
    MissingCredentials { field: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach Kinetic server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Unexpected response: {message}")]
    InvalidResponse { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<kinetic_api::Error> for CoreError {
    fn from(err: kinetic_api::Error) -> Self {
        match err {
            kinetic_api::Error::MissingCredentials { field } => {
                CoreError::MissingCredentials { field }
            }
            kinetic_api::Error::InvalidCredentials { message } => CoreError::Config { message },
            kinetic_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            kinetic_api::Error::UnsupportedBaseUrl { url } => CoreError::Config {
                message: format!("Base URL cannot be used for API requests: {url}"),
            },
            kinetic_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            kinetic_api::Error::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    url: e
                        .url()
                        .map_or_else(|| "<unknown>".into(), ToString::to_string),
                    reason: e.to_string(),
                }
            }
            kinetic_api::Error::Transport(e) => CoreError::Api {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            kinetic_api::Error::Http { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                },
                status: Some(status),
            },
            kinetic_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
