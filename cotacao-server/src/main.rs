use cotacao_axum::start_server;
use cotacao_server::{AppConfig, Cli, impls::RelayApp};
use cotacao_sqlite::Db;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project. Without RUST_LOG we still want the
    // request outcomes (timeouts, failed inserts) on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // Create config with proper layering of CLI args
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    // The table is created here, before the first request can arrive
    let db = Db::open(&database).await?;
    tracing::info!(
        database = ?database.database_path,
        "price store opened"
    );
    let app = RelayApp { db };

    start_server(server, app).await?;

    Ok(())
}
