//! Login call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login is the one call outside the augmenter: a 401 here means bad
//! credentials, so it must not trigger the session-expired logout path.

use reqwest::Method;

use super::augmenter::{ApiClient, ApiRequest};
use super::types::{LoginRequest, LoginResponse};
use crate::error::ClientError;
use crate::navigation::Route;

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

pub const LOGIN_PATH: &str = "/auth/login";

const LOGIN_FAILED_MESSAGE: &str = "login failed; try again";

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/login` with the given credentials.
    ///
    /// # Errors
    ///
    /// [`ClientError::Status`] carrying the backend's message (or a generic
    /// one when the backend sent none), or a transport/decode error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        let request = ApiRequest::new(Method::POST, LOGIN_PATH).json(body);
        self.api.send_public_json(request).await.map_err(|e| match e {
            ClientError::Status { status, message } if message.is_empty() => {
                ClientError::Status { status, message: LOGIN_FAILED_MESSAGE.to_owned() }
            }
            other => other,
        })
    }

    /// Log in, persist the session, and move to the product view.
    ///
    /// On failure the stored session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// As [`AuthClient::login`].
    pub async fn login_and_store(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self.login(email, password).await?;
        let session = self.api.session();
        session.login(&response.token, &response.user);
        session.navigate(Route::Products);
        tracing::info!(%email, "logged in");
        Ok(response)
    }
}
