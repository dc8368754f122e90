//! Session handling: login, logout, restore, and authenticated requests.
//!
//! The session is an explicit [`AuthContext`] value handed to whoever needs it.
//! It mirrors its state into [`LocalStorage`] under `jwt_token` and `user`;
//! both keys are always written and cleared together.

pub mod adapter;

use prodmanage_types::{LoginForm, SessionUser};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{self, ApiClient, ApiError, ApiResult};
use crate::storage::{LocalStorage, TOKEN_KEY, USER_KEY};

/// Session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, user: SessionUser },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyEnvelope {
    user: Value,
}

/// Holds the session and performs requests on its behalf.
#[derive(Debug)]
pub struct AuthContext {
    api: ApiClient,
    storage: LocalStorage,
    session: Session,
}

impl AuthContext {
    /// Creates a context, restoring a persisted session if one is present.
    ///
    /// Stored data that does not parse is removed and the context starts
    /// anonymous.
    pub fn restore(api: ApiClient, mut storage: LocalStorage) -> Self {
        let stored = match (storage.get(TOKEN_KEY), storage.get(USER_KEY)) {
            (Some(token), Some(user)) => Some((
                token.to_string(),
                serde_json::from_str::<SessionUser>(user),
            )),
            _ => None,
        };

        let session = match stored {
            Some((token, Ok(user))) => {
                debug!(user = %user.email, "restored session");
                Session::Authenticated { token, user }
            }
            Some((_, Err(err))) => {
                debug!(error = %err, "discarding unreadable stored session");
                if let Err(err) = storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
                    warn!(error = %err, "failed to clear stored session");
                }
                Session::Anonymous
            }
            None => Session::Anonymous,
        };

        Self {
            api,
            storage,
            session,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session.user()
    }

    /// Logs in with `email` and `password`.
    ///
    /// Returns `false` on bad credentials, a response without a usable token
    /// and user, an undecodable body, or a transport failure. The cause is
    /// logged, not returned. A session that could not be written to storage
    /// still counts as logged in; check [`AuthContext::is_session_saved`].
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let form = LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        };
        debug!(?form, "attempting login");

        let response = match self
            .api
            .request(Method::POST, &["auth", "login"])
            .json(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "login request failed");
                return false;
            }
        };

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(%status, error = %err, "login response was not JSON");
                return false;
            }
        };

        if !status.is_success() {
            let reason = body.get("error").and_then(Value::as_str).unwrap_or("");
            warn!(%status, reason, "login rejected");
            return false;
        }

        let Some((token, user)) = adapter::session_from_login_response(&body) else {
            warn!("login response is missing a token or user");
            return false;
        };

        self.establish(token, user);
        true
    }

    /// Drops the session and clears the persisted keys.
    pub fn logout(&mut self) {
        if self.session.is_authenticated() {
            info!("logging out");
        }
        self.session = Session::Anonymous;
        if let Err(err) = self.storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
            warn!(error = %err, "failed to clear stored session");
        }
    }

    /// Sends `request` with a JSON content type and, when signed in, a bearer
    /// token. A 401 response ends the session before it is returned.
    ///
    /// # Errors
    /// Returns the transport error if the request could not be built or sent.
    pub async fn make_authenticated_request(
        &mut self,
        request: RequestBuilder,
    ) -> Result<Response, reqwest::Error> {
        let mut request = request.build()?;

        let headers = request.headers_mut();
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(err) => warn!(error = %err, "stored token is not a valid header value"),
            }
        }

        debug!(method = %request.method(), url = %request.url(), "authenticated request");
        let response = self.api.http().execute(request).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "request unauthorized; ending session");
            self.logout();
        }

        Ok(response)
    }

    /// Asks the backend who the current token belongs to (`GET /auth/verify`).
    ///
    /// # Errors
    /// Returns an error on transport failure, a rejected token (which also
    /// logs out), or a response without a user.
    pub async fn verify(&mut self) -> ApiResult<SessionUser> {
        let request = self.api.request(Method::GET, &["auth", "verify"]);
        let response = self.make_authenticated_request(request).await?;
        let envelope: VerifyEnvelope = api::decode(response).await?;
        adapter::session_user_from(&envelope.user)
            .ok_or_else(|| ApiError::Decode("verify response has no usable user".to_string()))
    }

    /// True when the current session is also in storage, so the next
    /// [`AuthContext::restore`] will pick it up.
    pub fn is_session_saved(&self) -> bool {
        match &self.session {
            Session::Authenticated { token, .. } => {
                self.storage.get(TOKEN_KEY) == Some(token.as_str())
                    && self.storage.get(USER_KEY).is_some()
            }
            Session::Anonymous => false,
        }
    }

    fn establish(&mut self, token: String, user: SessionUser) {
        info!(user = %user.email, "logged in");
        match serde_json::to_string(&user) {
            Ok(serialized) => {
                let pairs = [(TOKEN_KEY, token.clone()), (USER_KEY, serialized)];
                if let Err(err) = self.storage.set_all(&pairs) {
                    warn!(error = %err, "failed to persist session");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize session user"),
        }
        self.session = Session::Authenticated { token, user };
    }
}
