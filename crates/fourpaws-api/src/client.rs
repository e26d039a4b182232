// Hand-crafted async HTTP client for the FourPaws REST backend.
//
// Single egress point: bearer-token injection, media URL rewriting,
// and 401 session teardown all happen here. Endpoint methods live in
// `endpoints/`, grouped per resource.

use arc_swap::ArcSwapOption;
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::ApiConfig;

/// Image path substituted when an animal carries no image reference.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the FourPaws backend.
///
/// Holds the current bearer token; callers install it after login and
/// the client removes it itself on the first 401, broadcasting the
/// expiry through a `watch` channel so the session layer can tear
/// down exactly once.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Scheme + host (+ port), precomputed for upload-path rewriting.
    origin: String,
    token: ArcSwapOption<SecretString>,
    /// Count of session expiries observed; bumped once per torn-down token.
    session_expiry: watch::Sender<u64>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from connection settings.
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self::from_reqwest(config.base_url.clone(), http))
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport).
    pub fn from_reqwest(base_url: Url, http: reqwest::Client) -> Self {
        let base_url = normalize_base(base_url);
        let origin = base_url.origin().ascii_serialization();
        let (session_expiry, _) = watch::channel(0u64);

        Self {
            http,
            base_url,
            origin,
            token: ArcSwapOption::empty(),
            session_expiry,
        }
    }

    // ── Token lifecycle ──────────────────────────────────────────────

    /// Install the bearer token attached to every subsequent request.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(token.into()));
    }

    /// Drop the stored token without signalling expiry (logout path).
    pub fn clear_token(&self) {
        self.token.store(None);
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    /// Observe session expiries. The value is a counter; it increments
    /// exactly once per token the client tears down on a 401.
    pub fn session_expiry(&self) -> watch::Receiver<u64> {
        self.session_expiry.subscribe()
    }

    /// Clear the token and notify watchers. A second 401 against an
    /// already-cleared session is a no-op, which is what breaks the
    /// redirect loop the web client had to guard against.
    pub(crate) fn expire_session(&self) {
        if self.token.swap(None).is_some() {
            warn!("session expired: stored token cleared");
            self.session_expiry.send_modify(|n| *n += 1);
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/animals"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining relative paths works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.load_full() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url)).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorize(self.http.get(url))
            .query(params)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self
            .authorize(self.http.post(url))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// POST with no request body (relation toggles: like, follow).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url)).send().await?;
        self.handle_response(resp).await
    }

    /// POST a multipart form. No explicit content type is set; reqwest
    /// supplies `multipart/form-data` with the boundary itself.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url} (multipart)");

        let resp = self
            .authorize(self.http.post(url))
            .multipart(form)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.authorize(self.http.put(url)).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Error::Unauthorized;
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        // 403 is authenticated-but-not-permitted; the session survives.
        if status == reqwest::StatusCode::FORBIDDEN {
            return Error::Forbidden { message };
        }

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ── Media URL normalization ──────────────────────────────────────

    /// Rewrite backend-relative `/uploads/…` paths to absolute URLs
    /// against the backend origin, and substitute the placeholder for
    /// missing references. Applied to every animal-endpoint response.
    pub(crate) fn normalize_image(&self, raw: Option<String>) -> String {
        match raw {
            None => PLACEHOLDER_IMAGE.to_owned(),
            Some(url) if url.is_empty() => PLACEHOLDER_IMAGE.to_owned(),
            Some(url) if url.starts_with("/uploads/") => format!("{}{url}", self.origin),
            Some(url) => url,
        }
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let base = Url::parse("https://paws.example.com").unwrap();
        ApiClient::from_reqwest(base, reqwest::Client::new())
    }

    #[test]
    fn normalize_fills_placeholder_for_missing_image() {
        let c = client();
        assert_eq!(c.normalize_image(None), PLACEHOLDER_IMAGE);
        assert_eq!(c.normalize_image(Some(String::new())), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn normalize_prefixes_relative_uploads() {
        let c = client();
        assert_eq!(
            c.normalize_image(Some("/uploads/rex.jpg".into())),
            "https://paws.example.com/uploads/rex.jpg"
        );
    }

    #[test]
    fn normalize_leaves_absolute_urls_alone() {
        let c = client();
        assert_eq!(
            c.normalize_image(Some("https://cdn.example.com/rex.jpg".into())),
            "https://cdn.example.com/rex.jpg"
        );
    }

    #[test]
    fn expire_session_notifies_exactly_once() {
        let c = client();
        let rx = c.session_expiry();
        assert_eq!(*rx.borrow(), 0);

        c.set_token(SecretString::from("tok"));
        c.expire_session();
        c.expire_session();

        assert_eq!(*rx.borrow(), 1);
        assert!(!c.has_token());
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = Url::parse("https://paws.example.com/v2").unwrap();
        let c = ApiClient::from_reqwest(base, reqwest::Client::new());
        assert_eq!(c.url("api/animals").as_str(), "https://paws.example.com/v2/api/animals");
    }
}
