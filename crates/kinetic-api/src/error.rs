use thiserror::Error;

/// Top-level error type for the `kinetic-api` crate.
///
/// Covers configuration problems caught at construction time and every
/// failure mode of a single request. Request errors are handed back to the
/// caller as-is; `kinetic-core` decides what the user gets to see.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// A required credential was not configured (or was empty).
    #[error("Kinetic credentials not configured: missing {field}")]
    MissingCredentials { field: &'static str },

    /// The credentials could not be encoded into an HTTP header.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:` or `data:`).
    #[error("Base URL cannot be used for API requests: {url}")]
    UnsupportedBaseUrl { url: String },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for configuration errors raised before any request.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials { .. }
                | Self::InvalidCredentials { .. }
                | Self::InvalidUrl(_)
                | Self::UnsupportedBaseUrl { .. }
                | Self::Tls(_)
        )
    }

    /// The HTTP status code, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
