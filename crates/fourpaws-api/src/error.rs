use thiserror::Error;

/// Top-level error type for the `fourpaws-api` crate.
///
/// Splits failures along the lines consumers care about: transport
/// problems, session teardown (401), permission denials (403), and
/// business errors reported by the backend. `fourpaws-core` maps these
/// into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// 401 from any endpoint. The client has already cleared its
    /// stored token by the time this surfaces.
    #[error("Session expired or not authenticated")]
    Unauthorized,

    /// 403 -- authenticated but not permitted. Never tears down the
    /// session.
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Backend ─────────────────────────────────────────────────────
    /// Business error reported by the backend, with the message from
    /// the response body when one was present.
    #[error("Backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error tore down the session (401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The server-provided message, when the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Forbidden { message } => Some(message),
            _ => None,
        }
    }
}
