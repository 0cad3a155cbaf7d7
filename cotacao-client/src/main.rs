use clap::Parser as _;
use cotacao_client::BaseArgs;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = BaseArgs::parse();

    // Anything but a timeout ends the process with a non-zero status
    args.evaluate()
        .await
        .inspect_err(|err| tracing::error!(err = %err, "fatal"))
}
