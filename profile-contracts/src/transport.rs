use async_trait::async_trait;
pub use http::{HeaderMap, HeaderName, HeaderValue, Method};
use thiserror::Error;
use url::Url;

/// A fully built request: target, verb, headers and url-encoded form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub form: Vec<(String, String)>,
}

impl PostRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: Method::POST,
            headers: HeaderMap::new(),
            form: Vec::new(),
        }
    }

    /// Add an already parsed header.
    pub fn with_typed_header(
        mut self,
        name: HeaderName,
        value: HeaderValue,
    ) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Parse and add a header whose name or value comes from outside.
    pub fn with_header(
        self,
        name: &str,
        value: &str,
    ) -> Result<Self, RequestBuildError> {
        let parsed_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                RequestBuildError::HeaderName {
                    name: name.to_string(),
                    source,
                }
            })?;
        let parsed_value = HeaderValue::from_str(value).map_err(|source| {
            RequestBuildError::HeaderValue {
                name: parsed_name.clone(),
                source,
            }
        })?;
        Ok(self.with_typed_header(parsed_name, parsed_value))
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Header lookup; names compare case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A header that could not be put on the wire.
#[derive(Debug, Error)]
pub enum RequestBuildError {
    #[error("'{name}' is not a valid header name")]
    HeaderName {
        name: String,
        #[source]
        source: http::header::InvalidHeaderName,
    },

    #[error("value for header {name} is not a valid header value")]
    HeaderValue {
        name: HeaderName,
        #[source]
        source: http::header::InvalidHeaderValue,
    },
}

/// Completion of a successful (2xx) request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200, "")
    }
}

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("could not connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("server responded with status {status}")]
    Status { status: u16, body: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Status code for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Asynchronous network boundary used to submit profile updates.
///
/// Resolving to `Ok` is the success callback; `Err` is the failure path.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        request: PostRequest,
    ) -> Result<TransportResponse, TransportError>;
}
