//! The client for the upstream price API.

use crate::config::AxumConfig;
use axum::{body::Bytes, http::StatusCode};
use std::time::Duration;

/// Ways an upstream fetch can fail.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The fetch did not complete within its deadline and was abandoned
    #[error("upstream did not answer within {0:?}")]
    DeadlineExceeded(Duration),

    /// The upstream answered, but not with `200 OK`
    #[error("upstream answered with status {0}")]
    Status(StatusCode),

    /// The request could not be sent or the body could not be read
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A handle on the upstream price API.
///
/// Every call to [`Upstream::fetch`] runs under a fresh deadline; nothing is
/// carried over from one request to the next except the connection pool.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    url: String,
    deadline: Duration,
}

impl Upstream {
    /// Build the client from the relay configuration.
    pub fn new(config: &AxumConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cotacao/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.upstream_url.clone(),
            deadline: config.upstream_timeout,
        })
    }

    /// Fetch the raw quotation payload.
    ///
    /// The deadline covers sending the request and reading the whole body.
    pub async fn fetch(&self) -> Result<Bytes, UpstreamError> {
        let request = async {
            let response = self.client.get(&self.url).send().await?;
            let status = response.status();
            if status != StatusCode::OK {
                return Err(UpstreamError::Status(status));
            }
            Ok(response.bytes().await?)
        };

        tokio::time::timeout(self.deadline, request)
            .await
            .map_err(|_| UpstreamError::DeadlineExceeded(self.deadline))?
    }
}
