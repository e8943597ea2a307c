//! The authenticated request wrapper.
//!
//! Every call to the API goes through [`AuthenticatedClient`]. It reads the
//! bearer token from the session store when the request is built, sends
//! exactly one request, and applies the shared failure policy: 401 and 403
//! clear the session, everything else is returned to the caller unchanged.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::session_store::SessionStore;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn json(body: Value) -> Self {
        Self {
            body: RequestBody::Json(body),
            ..Default::default()
        }
    }

    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            body: RequestBody::Form(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A successful response with its body read to the end.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Pulls a human readable message out of an error body.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(fields)) => ["message", "mensaje", "error", "detail"]
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(|value| value.as_str().map(str::trim).filter(|s| !s.is_empty()))
            .map(str::to_string),
        Ok(Value::String(text)) => Some(text).filter(|t| !t.trim().is_empty()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

#[derive(Clone)]
pub struct AuthenticatedClient {
    base_url: String,
    http: reqwest::Client,
    sessions: SessionStore,
    extra_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl AuthenticatedClient {
    pub fn new(base_url: impl Into<String>, sessions: SessionStore) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            sessions,
            extra_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Headers added to every request, before the caller's own headers.
    pub fn with_extra_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request carrying the stored session's bearer token.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let session = self.sessions.load().ok_or(ApiError::LoginRequired)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", session.token))
            .map_err(|_| ApiError::LoginRequired)?;

        let mut headers = self.merged_headers(options.headers);
        // insert() replaces any Authorization value supplied by the caller.
        headers.insert(AUTHORIZATION, bearer);

        let response = self.send(method, path, headers, options.body).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!(
                "{} answered {}, clearing the local session",
                path,
                status.as_u16()
            );
            self.sessions.clear();
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }
        Self::finish(path, response).await
    }

    /// Sends a request without any session, for login, registration and
    /// password recovery. Any Authorization header is stripped.
    pub async fn public_request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let mut headers = self.merged_headers(options.headers);
        headers.remove(AUTHORIZATION);
        let response = self.send(method, path, headers, options.body).await?;
        Self::finish(path, response).await
    }

    fn merged_headers(&self, caller: HeaderMap) -> HeaderMap {
        let mut headers = self.extra_headers.clone();
        for (name, value) in caller.iter() {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: RequestBody,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encode_form(&fields)),
        };

        builder.send().await.map_err(|e| {
            log::warn!("Request to {} failed: {}", url, e);
            ApiError::Network(e.to_string())
        })
    }

    async fn finish(path: &str, response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;
        if status.is_success() {
            return Ok(ApiResponse {
                status: status.as_u16(),
                body,
            });
        }
        let message = error_message(&body);
        log::info!("{} answered {}: {:?}", path, status.as_u16(), message);
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
