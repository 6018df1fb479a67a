use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::FieldError;

/// A failed call as seen by the client. `status` is 0 when no response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg} ({status})")]
pub struct ApiError {
    pub msg: String,
    pub status: u16,
    pub errors: Vec<FieldError>,
}

impl ApiError {
    /// One message per failed field, or the top-level message.
    pub fn messages(&self) -> Vec<String> {
        if self.errors.is_empty() {
            vec![self.msg.clone()]
        } else {
            self.errors.iter().map(|e| e.msg.clone()).collect()
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError {
            msg: err.to_string(),
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            errors: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

/// Thin HTTP wrapper around the REST API. Holds the session token once
/// a login or registration succeeded.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::send(self.request(Method::PUT, path).json(body)).await
    }

    /// `PUT` without a body, as used by like/unlike
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(self.request(Method::PUT, path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.json::<ErrorBody>().await.ok();
        Err(Self::error_from(status, body))
    }

    fn error_from(status: StatusCode, body: Option<ErrorBody>) -> ApiError {
        let fallback = || status.canonical_reason().unwrap_or("Request failed").to_string();

        match body {
            Some(body) => ApiError {
                msg: body.error.unwrap_or_else(fallback),
                status: status.as_u16(),
                errors: body.errors,
            },
            None => ApiError {
                msg: fallback(),
                status: status.as_u16(),
                errors: Vec::new(),
            },
        }
    }
}
