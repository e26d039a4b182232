//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fourpaws_core::CoreError;

/// Process exit codes, one per failure class.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CANCELLED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(fourpaws::connection_failed),
        help(
            "Check that the backend is running and the URL is right.\n\
             The hosted backend sleeps when idle; the first request\n\
             after a while can take most of a minute to answer."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out{}", url_suffix(.url))]
    #[diagnostic(
        code(fourpaws::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout { url: Option<String> },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(fourpaws::auth_failed),
        help("Check the username and password and try again.")
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(fourpaws::auth_required),
        help("This action needs an account. Run: fourpaws auth login")
    )]
    AuthRequired,

    #[error("Session expired")]
    #[diagnostic(
        code(fourpaws::session_expired),
        help("The saved session is no longer valid. Run: fourpaws auth login")
    )]
    SessionExpired,

    #[error("Permission denied: {message}")]
    #[diagnostic(code(fourpaws::permission_denied))]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Not found: {what}")]
    #[diagnostic(
        code(fourpaws::not_found),
        help("Run the matching list command to see what exists.")
    )]
    NotFound { what: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend error{}: {message}", status_suffix(.status))]
    #[diagnostic(code(fourpaws::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Invalid server response: {context}")]
    #[diagnostic(
        code(fourpaws::bad_response),
        help("The backend answered with something this client does not understand.")
    )]
    BadResponse { context: String },

    #[error("Gave up after {attempts} attempts: {last}")]
    #[diagnostic(
        code(fourpaws::retries_exhausted),
        help("The backend kept failing. It may still be waking up; try again shortly.")
    )]
    GaveUp { attempts: u32, last: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(fourpaws::cancelled))]
    Cancelled,

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fourpaws::validation))]
    Validation { field: String, reason: String },

    // ── Configuration / persistence ──────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(fourpaws::config),
        help("Check the config file, or recreate it with: fourpaws config init")
    )]
    Config { message: String },

    #[error("Session storage error: {message}")]
    #[diagnostic(
        code(fourpaws::storage),
        help("The session file may be corrupt. Logging in again rewrites it.")
    )]
    Storage { message: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::AuthRequired | Self::SessionExpired => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Cancelled => exit_code::CANCELLED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

fn url_suffix(url: &Option<String>) -> String {
    url.as_deref()
        .map(|u| format!(" ({u})"))
        .unwrap_or_default()
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::SessionExpired => CliError::SessionExpired,
            CoreError::SessionRequired => CliError::AuthRequired,
            CoreError::InvalidServerResponse { context } => CliError::BadResponse { context },
            CoreError::PermissionDenied { message } => CliError::PermissionDenied { message },
            CoreError::NotFound { what } => CliError::NotFound { what },
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::Timeout { url } => CliError::Timeout { url },
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::RetriesExhausted { attempts, source } => CliError::GaveUp {
                attempts,
                last: source.to_string(),
            },
            CoreError::Cancelled => CliError::Cancelled,
            CoreError::Storage { message } => CliError::Storage { message },
            CoreError::Config { message } => CliError::Config { message },
            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<fourpaws_config::ConfigError> for CliError {
    fn from(err: fourpaws_config::ConfigError) -> Self {
        match err {
            fourpaws_config::ConfigError::Validation { field, reason } => {
                CliError::Validation { field, reason }
            }
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_share_the_auth_exit_code() {
        for err in [
            CliError::AuthRequired,
            CliError::SessionExpired,
            CliError::AuthFailed {
                message: "bad password".into(),
            },
        ] {
            assert_eq!(err.exit_code(), exit_code::AUTH);
        }
    }

    #[test]
    fn core_variants_keep_their_failure_class() {
        let err = CliError::from(CoreError::SessionRequired);
        assert!(matches!(err, CliError::AuthRequired));

        let err = CliError::from(CoreError::NotFound {
            what: "animal 7".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);

        let err = CliError::from(CoreError::Cancelled);
        assert_eq!(err.exit_code(), exit_code::CANCELLED);
    }

    #[test]
    fn retries_exhausted_flattens_the_source() {
        let err = CliError::from(CoreError::RetriesExhausted {
            attempts: 3,
            source: Box::new(CoreError::Api {
                message: "boom".into(),
                status: Some(500),
            }),
        });
        let text = err.to_string();
        assert!(text.contains("3 attempts"));
        assert!(text.contains("boom"));
    }
}
