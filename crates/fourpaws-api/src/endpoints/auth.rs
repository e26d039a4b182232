// Auth endpoints
//
// Login, registration, and current-user resolution. These return the
// raw `AuthResponse`; the session layer decides what a valid response
// must contain and owns the token lifecycle.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AuthResponse, RegisterRequest};

impl ApiClient {
    /// Authenticate with username and password.
    ///
    /// `POST /auth/login`
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            password: &'a str,
        }

        self.post(
            "auth/login",
            &Body {
                username,
                password: password.expose_secret(),
            },
        )
        .await
    }

    /// Create an account.
    ///
    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, Error> {
        self.post("auth/register", request).await
    }

    /// Resolve the user behind the installed bearer token.
    ///
    /// `GET /auth/me`
    pub async fn me(&self) -> Result<AuthResponse, Error> {
        self.get("auth/me").await
    }
}
