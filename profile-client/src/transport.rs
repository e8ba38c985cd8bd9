//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use profile_config::ClientConfig;
use profile_contracts::transport::{
    PostRequest, Transport, TransportError, TransportResponse,
};
use reqwest::{Client, redirect};
use tracing::debug;
use url::Url;

use crate::error::TransportBuildError;

/// Sends profile updates over HTTP.
///
/// Redirects are not followed: a session that expired server-side usually
/// answers with a redirect to a login page, which must count as a failure
/// rather than as an accepted update.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportBuildError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(
        config: &ClientConfig,
    ) -> Result<Self, TransportBuildError> {
        Self::new(config.request_timeout)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        request: PostRequest,
    ) -> Result<TransportResponse, TransportError> {
        let PostRequest {
            url,
            method,
            headers,
            form,
        } = request;

        debug!(%url, %method, fields = form.len(), "sending request");
        let response = self
            .client
            .request(method, url.clone())
            .headers(headers)
            .form(&form)
            .send()
            .await
            .map_err(|err| classify(&url, err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| classify(&url, err))?;
        debug!(
            %url,
            status = status.as_u16(),
            bytes = body.len(),
            "response received"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(TransportResponse::new(status.as_u16(), body))
    }
}

fn classify(url: &Url, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}
