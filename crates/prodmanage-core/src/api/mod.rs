//! REST client for the ProdManage backend.
//!
//! `ApiClient` knows the base URL and the public endpoints (registration,
//! user listing). Product endpoints require a session and live in
//! [`products`], where every call goes through
//! [`AuthContext::make_authenticated_request`](crate::auth::AuthContext::make_authenticated_request).

mod error;
pub mod products;

use anyhow::{Context, Result};
use prodmanage_types::{RegistrationForm, User};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub use error::{ApiError, ApiResult};
use error::ErrorEnvelope;

#[derive(Debug, Deserialize)]
struct RegisterEnvelope {
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<User>,
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5001/api`).
    ///
    /// # Errors
    /// Returns an error if `base_url` is not an absolute hierarchical URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid API base URL: {base_url}");
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `POST /register`. Returns the created user when the server echoes it.
    ///
    /// # Errors
    /// `ApiError::Rejected` carries the server's `error` and per-field `errors`.
    pub async fn register(&self, form: &RegistrationForm) -> ApiResult<Option<User>> {
        debug!(email = %form.email, "registering user");
        let response = self
            .request(Method::POST, &["register"])
            .json(form)
            .send()
            .await?;
        let envelope: RegisterEnvelope = decode(response).await?;
        Ok(envelope.user)
    }

    /// `GET /users`.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-OK status.
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let response = self.request(Method::GET, &["users"]).send().await?;
        let envelope: UsersEnvelope = decode(response).await?;
        Ok(envelope.users)
    }
}

/// Decodes an OK body into `T`, or a non-OK body into `ApiError::Rejected`.
///
/// A non-OK body that is not a JSON error envelope still yields `Rejected`,
/// with no message.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    } else {
        let envelope = serde_json::from_slice(&body).unwrap_or_default();
        Err(ApiError::rejected(status.as_u16(), envelope))
    }
}

/// Like [`decode`] but ignores the body of an OK response.
pub(crate) async fn expect_ok(response: Response) -> ApiResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.bytes().await?;
    let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap_or_default();
    Err(ApiError::rejected(status.as_u16(), envelope))
}
