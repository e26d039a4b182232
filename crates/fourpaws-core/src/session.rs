// ── Auth session ──
//
// Current identity and token lifecycle. The session decides what a
// valid auth response must contain, owns the persisted token/user
// pair, and is the only place that moves the state machine:
//
//   Uninitialized -> Resolving -> { Authenticated, Anonymous }
//
// After startup the only transitions left are Authenticated ->
// Anonymous (logout or expiry) and Anonymous -> Authenticated (login);
// the machine never returns to Resolving.

use std::fmt;
use std::sync::{Arc, Mutex};

use fourpaws_api::ApiClient;
use fourpaws_api::types::AuthResponse;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{NewAccount, User};

// ── State machine ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Construction state; `initialize` has not run yet.
    Uninitialized,
    /// Startup restore of a persisted session is in flight.
    Resolving,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

// ── Credential persistence ───────────────────────────────────────────

/// The durable token/user pair that survives process restarts.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for PersistedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Durable storage for the session pair. Implementations are
/// synchronous; the session calls them around network operations, not
/// on hot paths.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<PersistedSession>, CoreError>;
    fn save(&self, session: &PersistedSession) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

/// In-memory credential store. Sessions using it last exactly as long
/// as the process; useful as a default and in tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<PersistedSession>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<PersistedSession>, CoreError> {
        Ok(self.slot.lock().expect("credential lock poisoned").clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), CoreError> {
        *self.slot.lock().expect("credential lock poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.slot.lock().expect("credential lock poisoned") = None;
        Ok(())
    }
}

// ── Session ──────────────────────────────────────────────────────────

pub struct Session {
    client: Arc<ApiClient>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub(crate) fn new(client: Arc<ApiClient>, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            client,
            credentials,
            state,
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state.borrow(), SessionState::Authenticated(_))
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Restore a persisted session, if one exists, with a single
    /// backend round trip. On any failure the stored pair is cleared
    /// and the session comes up `Anonymous`; there is no retry.
    ///
    /// Calling this more than once is a no-op that returns the
    /// current state.
    pub async fn initialize(&self) -> SessionState {
        let first_run = self.state.send_if_modified(|state| match state {
            SessionState::Uninitialized => {
                *state = SessionState::Resolving;
                true
            }
            _ => false,
        });
        if !first_run {
            return self.state();
        }

        let persisted = match self.credentials.load() {
            Ok(persisted) => persisted,
            Err(err) => {
                warn!("could not read persisted session: {err}");
                None
            }
        };

        let Some(persisted) = persisted else {
            debug!("no persisted session; starting anonymous");
            self.force_anonymous();
            return self.state();
        };

        self.client.set_token(SecretString::from(persisted.token.clone()));
        match self.client.me().await {
            Ok(auth) => match auth.user {
                Some(user) => {
                    let user = User::from(user);
                    info!("restored session for {}", user.username);
                    // Refresh the stored user record; the token is
                    // still the persisted one.
                    let refreshed = PersistedSession {
                        token: persisted.token,
                        user: user.clone(),
                    };
                    if let Err(err) = self.credentials.save(&refreshed) {
                        warn!("could not refresh persisted session: {err}");
                    }
                    self.state
                        .send_modify(|state| *state = SessionState::Authenticated(user));
                }
                None => {
                    warn!("persisted token resolved to no user; signing out");
                    self.teardown();
                }
            },
            Err(err) => {
                warn!("persisted session rejected: {err}");
                self.teardown();
            }
        }

        self.state()
    }

    /// Authenticate and persist the session pair.
    ///
    /// The pair is persisted and installed only when the response
    /// carries both a token and a user; a response missing either is
    /// an invalid-response error and nothing changes.
    pub async fn login(&self, username: &str, password: SecretString) -> Result<User, CoreError> {
        let auth = self
            .client
            .login(username, &password)
            .await
            .map_err(login_rejection)?;
        self.install(auth, "login")
    }

    /// Create an account; a successful registration logs in directly.
    pub async fn register(&self, account: NewAccount) -> Result<User, CoreError> {
        let request = account.into_request();
        let auth = self.client.register(&request).await?;
        self.install(auth, "register")
    }

    /// End the session locally. No backend call is involved; the
    /// bearer token simply stops being sent.
    pub fn logout(&self) {
        info!("logged out");
        self.client.clear_token();
        self.teardown_credentials();
        self.force_anonymous();
    }

    /// React to the client tearing down an expired token. The client
    /// already dropped the token; this clears the persisted pair and
    /// announces the sign-out. Repeated expiries collapse into one
    /// state transition.
    pub(crate) fn handle_expiry(&self) {
        info!("session expired; signing out");
        self.teardown_credentials();
        self.force_anonymous();
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Validate an auth response and make it the current session.
    fn install(&self, auth: AuthResponse, action: &str) -> Result<User, CoreError> {
        let (Some(token), Some(user)) = (auth.token, auth.user) else {
            return Err(CoreError::InvalidServerResponse {
                context: format!("{action} response missing token or user"),
            });
        };
        let user = User::from(user);

        self.credentials.save(&PersistedSession {
            token: token.clone(),
            user: user.clone(),
        })?;
        self.client.set_token(SecretString::from(token));
        self.state
            .send_modify(|state| *state = SessionState::Authenticated(user.clone()));
        info!("{action} succeeded for {}", user.username);
        Ok(user)
    }

    fn teardown(&self) {
        self.client.clear_token();
        self.teardown_credentials();
        self.force_anonymous();
    }

    fn teardown_credentials(&self) {
        if let Err(err) = self.credentials.clear() {
            warn!("could not clear persisted session: {err}");
        }
    }

    /// Move to `Anonymous`, notifying watchers only on an actual
    /// transition so repeated teardowns cannot loop consumers.
    fn force_anonymous(&self) {
        self.state.send_if_modified(|state| {
            if *state == SessionState::Anonymous {
                false
            } else {
                *state = SessionState::Anonymous;
                true
            }
        });
    }
}

/// Login failures arrive as 401s or message-bearing API errors; both
/// become `AuthenticationFailed` so callers show one kind of message.
fn login_rejection(err: fourpaws_api::Error) -> CoreError {
    match err {
        fourpaws_api::Error::Unauthorized => CoreError::AuthenticationFailed {
            message: "invalid username or password".into(),
        },
        fourpaws_api::Error::Api { message, .. } => CoreError::AuthenticationFailed { message },
        other => other.into(),
    }
}
