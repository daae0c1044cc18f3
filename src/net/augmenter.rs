//! Request augmenter: the single pass every authenticated API call takes.
//!
//! DESIGN
//! ======
//! Order is fixed and runs once per request:
//! 1. rewrite relative paths against the configured base URL,
//! 2. attach `Authorization: Bearer <token>` when a session token exists,
//! 3. dispatch,
//! 4. on 401, log the session out and hand the failure back to the caller.
//!
//! No retry, replay, caching, or ordering across requests. Steps 1 and 2 are
//! pure functions over [`ApiRequest`] so they can be checked without a server.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, is_absolute_url};
use crate::error::{ClientError, error_message_from_body};
use crate::session::SessionService;

#[cfg(test)]
#[path = "augmenter_test.rs"]
mod augmenter_test;

/// Outgoing request before transmission.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Prefix `path` with `base_url` unless it is already absolute.
#[must_use]
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_owned();
    }
    format!("{base_url}{path}")
}

/// Attach the bearer header when `token` is present; otherwise leave headers alone.
///
/// # Errors
///
/// Returns [`ClientError::InvalidHeader`] if the token contains bytes not
/// allowed in a header value.
pub fn authorize(mut request: ApiRequest, token: Option<&str>) -> Result<ApiRequest, ClientError> {
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, value);
    }
    Ok(request)
}

/// HTTP client with the augmenter composed in. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionService,
}

impl ApiClient {
    /// Build the shared transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(config: &ClientConfig, session: SessionService) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &SessionService {
        &self.session
    }

    /// Apply URL rewrite and token attachment without sending.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] for an unusable token.
    pub fn augment(&self, mut request: ApiRequest) -> Result<ApiRequest, ClientError> {
        request.url = resolve_url(&self.base_url, &request.url);
        authorize(request, self.session.token().as_deref())
    }

    /// Send an authenticated request through the full augmenter.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on 401, after the session was cleared.
    /// - [`ClientError::Status`] on any other non-success status.
    /// - [`ClientError::Http`] on transport failure.
    pub async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, ClientError> {
        let request = self.augment(request)?;
        let response = self.dispatch(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = read_error_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%message, "backend rejected session; logging out");
            self.session.logout();
            return Err(ClientError::Unauthorized { message });
        }
        Err(ClientError::Status { status: status.as_u16(), message })
    }

    /// Send through the full augmenter and decode a JSON body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`ClientError::Decode`] for a body of the wrong shape.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        decode_json(response).await
    }

    /// Send a request that is outside the session: only the base URL is
    /// applied. No token is attached and a 401 does not touch the session.
    ///
    /// # Errors
    ///
    /// [`ClientError::Status`] for any non-success status (401 included),
    /// [`ClientError::Http`] on transport failure, [`ClientError::Decode`] on a bad body.
    pub async fn send_public_json<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T, ClientError> {
        request.url = resolve_url(&self.base_url, &request.url);
        let response = self.dispatch(request).await?;
        let status = response.status();
        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(ClientError::Status { status: status.as_u16(), message });
        }
        decode_json(response).await
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(method = %request.method, url = %request.url, "api request");
        let builder = self.http.request(request.method, &request.url).headers(request.headers);
        let builder = if let Some(body) = &request.body { builder.json(body) } else { builder };
        Ok(builder.send().await?)
    }
}

async fn read_error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    error_message_from_body(&body)
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
