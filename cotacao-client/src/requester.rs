use cotacao_core::{DecodeError, decode_bid, models::StoredQuoteLine};
use reqwest::StatusCode;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Failures that end a requester run.
///
/// A timeout is not among them: it is an [`Outcome`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The relay could not be reached or the body could not be read
    #[error("error while requesting the quotation: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered, but not with `200 OK`
    #[error("failed to get dollar price: relay answered {0}")]
    Status(StatusCode),

    /// The relay's answer does not carry a readable bid
    #[error("error while decoding response: {0}")]
    Decode(#[from] DecodeError),

    /// The output artifact could not be written
    #[error("error while writing {}: {source}", .path.display())]
    Write {
        /// The artifact path
        path: PathBuf,
        /// The underlying failure
        source: std::io::Error,
    },
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The quotation was stored
    Written(StoredQuoteLine),
    /// The relay did not answer in time; nothing was written
    TimedOut(Duration),
}

/// A single-shot request for the current quotation.
pub struct Requester {
    client: reqwest::Client,
    url: String,
    deadline: Duration,
    output: PathBuf,
}

impl Requester {
    /// Prepare a request to `url`, bounded by `deadline`, storing into `output`.
    pub fn new(
        url: impl Into<String>,
        deadline: Duration,
        output: impl Into<PathBuf>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cotacao/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            deadline,
            output: output.into(),
        })
    }

    /// The artifact this requester writes to
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Perform the request and, on success, overwrite the artifact.
    ///
    /// There is exactly one attempt. The deadline covers the whole exchange
    /// with the relay, body included. The artifact is only touched once a bid
    /// has been decoded.
    pub async fn run(&self) -> Result<Outcome, RequestError> {
        let request = async {
            let response = self.client.get(&self.url).send().await?;
            let status = response.status();
            if status != StatusCode::OK {
                return Err(RequestError::Status(status));
            }
            Ok(response.bytes().await?)
        };

        let body = match tokio::time::timeout(self.deadline, request).await {
            Ok(body) => body?,
            Err(_) => return Ok(Outcome::TimedOut(self.deadline)),
        };

        let line = StoredQuoteLine::from(decode_bid(&body)?);

        tokio::fs::write(&self.output, line.to_string())
            .await
            .map_err(|source| RequestError::Write {
                path: self.output.clone(),
                source,
            })?;

        Ok(Outcome::Written(line))
    }
}
