#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the cotacao-axum crate.
//! [cotacao_core]: https://docs.rs/cotacao_core/latest/cotacao_core/index.html
//! [cotacao_axum]: https://docs.rs/cotacao_axum/latest/cotacao_axum/index.html
//! [cotacao_sqlite]: https://docs.rs/cotacao_sqlite/latest/cotacao_sqlite/index.html
#![doc = include_str!("../README.md")]

mod quotation_routes;

use axum::{Extension, Json, Router, routing::get};
use cotacao_core::ports::Application;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
use config::AxumConfig;

pub mod upstream;
use upstream::Upstream;

/// Response for the health check endpoint
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Errors that prevent the server from starting or keep it from serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding or serving failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The upstream client could not be built
    #[error("unable to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Construct the relay router with the given state, upstream client and config
pub fn router<T: ApiApplication>(state: T, upstream: Upstream, config: AxumConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/cotacao", get(quotation_routes::get_quotation::<T>))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(upstream)))
        .layer(Extension(Arc::new(config)))
        .with_state(state)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(config: AxumConfig, app: T) -> Result<(), ServerError> {
    let upstream = Upstream::new(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!(
        upstream = %config.upstream_url,
        "Listening for requests on {}",
        listener.local_addr()?
    );

    let service = router(app, upstream, config);
    axum::serve(listener, service).await?;
    Ok(())
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything the relay needs from its state should work.
pub trait ApiApplication:
    Clone + Send + Sync + 'static + Application<Repository: Send + Sync + 'static>
{
}

// this is the blanket implementation
impl<T> ApiApplication for T where
    T: Clone + Send + Sync + 'static + Application<Repository: Send + Sync + 'static>
{
}
