// ── Core error types ──
//
// User-facing errors from fourpaws-core. These are NOT transport-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<fourpaws_api::Error>` impl translates adapter-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- please log in again")]
    SessionExpired,

    #[error("Not logged in -- this action requires an account")]
    SessionRequired,

    /// Login/register responses must carry both a token and a user
    /// record; anything less is treated as a malformed response and
    /// nothing is persisted.
    #[error("Invalid server response: {context}")]
    InvalidServerResponse { context: String },

    // ── Authorization ────────────────────────────────────────────────
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Network errors ───────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out{}", url_suffix(.url))]
    Timeout { url: Option<String> },

    #[error("Backend error: {message}")]
    Api { message: String, status: Option<u16> },

    // ── Retry / cancellation ─────────────────────────────────────────
    #[error("Gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Storage { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that mean "log in (again) and retry".
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CoreError::SessionExpired
                | CoreError::SessionRequired
                | CoreError::AuthenticationFailed { .. }
        )
    }
}

fn url_suffix(url: &Option<String>) -> String {
    url.as_deref()
        .map(|u| format!(" ({u})"))
        .unwrap_or_default()
}

// ── Conversion from adapter-layer errors ─────────────────────────────

impl From<fourpaws_api::Error> for CoreError {
    fn from(err: fourpaws_api::Error) -> Self {
        match err {
            fourpaws_api::Error::Unauthorized => CoreError::SessionExpired,
            fourpaws_api::Error::Forbidden { message } => CoreError::PermissionDenied { message },
            fourpaws_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        url: e.url().map(ToString::to_string),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        what: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fourpaws_api::Error::Api { status: 404, message } => CoreError::NotFound {
                what: if message.is_empty() {
                    "resource".into()
                } else {
                    message
                },
            },
            fourpaws_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            fourpaws_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fourpaws_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_becomes_session_expired() {
        let err = CoreError::from(fourpaws_api::Error::Unauthorized);
        assert!(matches!(err, CoreError::SessionExpired));
        assert!(err.is_auth_error());
    }

    #[test]
    fn forbidden_keeps_server_message() {
        let err = CoreError::from(fourpaws_api::Error::Forbidden {
            message: "Solo el autor puede editar".into(),
        });
        match err {
            CoreError::PermissionDenied { ref message } => {
                assert_eq!(message, "Solo el autor puede editar");
            }
            ref other => panic!("expected PermissionDenied, got {other:?}"),
        }
        assert!(!err.is_auth_error());
    }

    #[test]
    fn api_404_becomes_not_found() {
        let err = CoreError::from(fourpaws_api::Error::Api {
            status: 404,
            message: "Animal no encontrado".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn retries_exhausted_reports_attempts_and_source() {
        let err = CoreError::RetriesExhausted {
            attempts: 3,
            source: Box::new(CoreError::Api {
                message: "boom".into(),
                status: Some(500),
            }),
        };
        let text = err.to_string();
        assert!(text.contains("3 attempts"));
        assert!(text.contains("boom"));
    }
}
