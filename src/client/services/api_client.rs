use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::client::utils::credential_store::{StoreError, TokenAccessor};

/// Flat failure taxonomy for every backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No token in the store; the request was not sent.
    #[error("not signed in")]
    NotAuthenticated,
    #[error("network error: {0}")]
    Transport(String),
    #[error("backend error: {status}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("credential store error: {0}")]
    Store(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e.to_string())
    }
}

/// HTTP client for the EventLink backend with the bearer token attached from
/// the credential store on every authenticated call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenAccessor,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: TokenAccessor) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { http: reqwest::Client::new(), base_url, tokens }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenAccessor {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        match self.tokens.get_token() {
            Some(token) => Ok(self.http.request(method, self.url(path)).bearer_auth(token)),
            None => {
                warn!("[API] No token found; skipping {} {}", method, path);
                Err(ApiError::NotAuthenticated)
            }
        }
    }

    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    // -- authenticated ------------------------------------------------------

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorized(Method::GET, path)?;
        decode(send(request, "GET", path).await?).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::POST, path)?.json(body);
        decode(send(request, "POST", path).await?).await
    }

    /// POST whose response body is ignored.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self.authorized(Method::POST, path)?.json(body);
        send(request, "POST", path).await.map(|_| ())
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::PUT, path)?.json(body);
        decode(send(request, "PUT", path).await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, path)?;
        send(request, "DELETE", path).await.map(|_| ())
    }

    // -- unauthenticated ----------------------------------------------------

    pub async fn get_json_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.public(Method::GET, path);
        decode(send(request, "GET", path).await?).await
    }

    pub async fn post_json_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.public(Method::POST, path).json(body);
        decode(send(request, "POST", path).await?).await
    }
}

/// Single attempt; any non-2xx is an error carrying the body text.
async fn send(request: RequestBuilder, method: &str, path: &str) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(|e| {
        warn!("[API] {} {} failed: {}", method, path, e);
        ApiError::Transport(e.to_string())
    })?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("[API] {} {} -> {}", method, path, status);
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    debug!("[API] {} {} -> {}", method, path, status);
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!("[API] Malformed response body: {}", e);
        ApiError::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::utils::credential_store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn skips_authenticated_call_without_token() {
        // unroutable base: the call must not even be attempted
        let api = ApiClient::new("http://127.0.0.1:9", TokenAccessor::new(Arc::new(MemoryStore::new())));
        let result: Result<serde_json::Value, _> = api.get_json("/api/users/profile").await;
        assert_eq!(result, Err(ApiError::NotAuthenticated));
    }

    #[test]
    fn base_url_is_normalised() {
        let api = ApiClient::new("http://localhost:8080/", TokenAccessor::new(Arc::new(MemoryStore::new())));
        assert_eq!(api.url("/api/groups"), "http://localhost:8080/api/groups");
    }

    #[test]
    fn status_accessor() {
        let e = ApiError::Status { status: 404, body: String::new() };
        assert_eq!(e.status(), Some(404));
        assert_eq!(ApiError::Transport("x".into()).status(), None);
        assert_eq!(e.to_string(), "backend error: 404");
    }
}
