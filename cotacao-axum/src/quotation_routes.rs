//! The `/cotacao` endpoint.
//!
//! Each request walks through the same steps: call the upstream API, and on
//! success extract the bid, try to record it, and answer with the upstream
//! body. Timeouts and upstream errors are answered directly, without
//! touching the repository.
//!
//! The fetch and the insert run on their own task, so a caller that hangs up
//! early does not cancel them: every successful fetch is recorded.

use crate::{ApiApplication, config::AxumConfig, upstream::Upstream, upstream::UpstreamError};
use axum::{
    Extension,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use cotacao_core::{extract_bid, ports::PriceRepository as _};
use std::{sync::Arc, time::Duration};
use tracing::{Instrument as _, Level, event};

/// Relay the current USD/BRL quotation.
///
/// # Returns
///
/// - `200 OK`: the upstream body, verbatim, as `application/json`
/// - `504 Gateway Timeout`: the upstream did not answer in time
/// - any other status: the upstream's own error status
/// - `500 Internal Server Error`: the upstream could not be reached
#[tracing::instrument(name = "cotacao", skip_all)]
pub(crate) async fn get_quotation<T: ApiApplication>(
    State(app): State<T>,
    Extension(upstream): Extension<Arc<Upstream>>,
    Extension(config): Extension<Arc<AxumConfig>>,
) -> Response {
    let relay = tokio::spawn(
        relay_quotation(app, upstream, config.persist_timeout).in_current_span(),
    );

    let body = match relay.await {
        Ok(Ok(body)) => body,
        Ok(Err(UpstreamError::DeadlineExceeded(deadline))) => {
            event!(Level::WARN, ?deadline, "request for the dollar price timed out");
            return (StatusCode::GATEWAY_TIMEOUT, "Request timed out").into_response();
        }
        Ok(Err(UpstreamError::Status(status))) => {
            event!(Level::WARN, %status, "upstream refused the quotation request");
            return (status, "Failed to fetch data").into_response();
        }
        Ok(Err(err @ UpstreamError::Transport(_))) => {
            event!(Level::ERROR, err = err.to_string());
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data").into_response();
        }
        Err(err) => {
            event!(Level::ERROR, err = err.to_string(), "relay task did not complete");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data").into_response();
        }
    };

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

// Both deadlines are enforced in here, on the spawned task.
async fn relay_quotation<T: ApiApplication>(
    app: T,
    upstream: Arc<Upstream>,
    persist_timeout: Duration,
) -> Result<Bytes, UpstreamError> {
    let body = upstream.fetch().await?;
    let price = extract_bid(&body);
    record_price(&app, price, persist_timeout).await;
    Ok(body)
}

// The outcome only ever reaches the logs; the caller gets the quotation regardless.
async fn record_price<T: ApiApplication>(app: &T, price: f64, deadline: Duration) {
    let as_of = app.now();
    match app.database().record_price(price, as_of, deadline).await {
        Ok(record) => {
            event!(Level::INFO, id = record.id, price, time = %record.time, "recorded price");
        }
        Err(err) => {
            event!(Level::WARN, price, err = err.to_string(), "failed to record price");
        }
    }
}
