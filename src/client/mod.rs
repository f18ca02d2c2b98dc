//! Upstream API client
//!
//! All persistent state lives behind an HTTP API. This module provides the
//! transport seam ([`Transport`]), the production reqwest implementation,
//! and [`ApiClient`], which attaches the stored bearer token to every
//! request and clears credentials on an unauthorized response. No request is
//! retried; every failure is terminal for the attempt.

pub mod credentials;
pub mod payload;

pub use credentials::{CredentialStore, AUTH_COOKIE, AUTH_STATE_COOKIE};
pub use payload::{FormPayload, PayloadPart};

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Generic message when the upstream gives no usable error body
pub const GENERIC_ERROR: &str = "Something went wrong";

/// One request to the upstream API
#[derive(Debug)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the configured base URL
    pub path: String,
    /// `Authorization` header value, when authenticated
    pub bearer: Option<String>,
    /// Request body
    pub body: RequestBody,
}

/// Body of an [`ApiRequest`]
#[derive(Debug)]
pub enum RequestBody {
    /// No body
    Empty,
    /// Multipart form data
    Multipart(FormPayload),
}

/// Raw upstream response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status
    pub status: StatusCode,
    /// Response body bytes
    pub body: Bytes,
}

/// Transport-level failure (connection, DNS, timeout)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Underlying HTTP client failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error surfaced to callers of [`ApiClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from upstream; stored credentials have been cleared
    #[error("unauthorized")]
    Unauthorized,
    /// Non-2xx upstream response with its message
    #[error("{message}")]
    Upstream {
        /// Response status
        status: StatusCode,
        /// Server-supplied message or the generic fallback
        message: String,
    },
    /// Could not reach the upstream at all
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// 2xx response body did not decode
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// One-shot notification text for this failure
    #[must_use]
    pub fn notification(&self) -> String {
        match self {
            Self::Upstream { message, .. } => message.clone(),
            Self::Unauthorized | Self::Transport(_) | Self::Decode(_) => {
                GENERIC_ERROR.to_string()
            }
        }
    }
}

/// Executes one upstream request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and return the raw response
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport against the given base URL (fixed at configuration time)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );

        let mut builder = self.http.request(request.method, &url);
        if let Some(bearer) = request.bearer {
            builder = builder.header(http::header::AUTHORIZATION, bearer);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Multipart(payload) => builder.multipart(payload.into_multipart()),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the upstream commerce API
///
/// Cloning shares the credential store, so a 401 seen by any clone signs the
/// whole application out.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    credentials: CredentialStore,
}

impl<T: Transport> ApiClient<T> {
    /// Client over a transport and a credential store
    pub const fn new(transport: T, credentials: CredentialStore) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// The shared credential store
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// POST a multipart payload; returns the raw 2xx response
    pub async fn post_multipart(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> Result<RawResponse, ApiError> {
        let raw = self
            .transport
            .execute(ApiRequest {
                method: Method::POST,
                path: path.to_string(),
                bearer: self.credentials.bearer(),
                body: RequestBody::Multipart(payload),
            })
            .await?;
        self.check(path, raw)
    }

    /// GET a JSON resource
    pub async fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, ApiError> {
        let raw = self
            .transport
            .execute(ApiRequest {
                method: Method::GET,
                path: path.to_string(),
                bearer: self.credentials.bearer(),
                body: RequestBody::Empty,
            })
            .await?;
        let raw = self.check(path, raw)?;
        Ok(serde_json::from_slice(&raw.body)?)
    }

    fn check(&self, path: &str, raw: RawResponse) -> Result<RawResponse, ApiError> {
        if raw.status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "unauthorized response, clearing credentials");
            self.credentials.clear();
            return Err(ApiError::Unauthorized);
        }
        if !raw.status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&raw.body)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_ERROR.to_string());
            tracing::warn!(path, status = %raw.status, %message, "upstream error");
            return Err(ApiError::Upstream {
                status: raw.status,
                message,
            });
        }
        Ok(raw)
    }
}
