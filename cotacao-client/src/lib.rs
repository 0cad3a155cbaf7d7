#![doc = include_str!("../README.md")]

use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tracing::{Level, event};

mod requester;
pub use requester::{Outcome, RequestError, Requester};

// The one and only thing this tool does, so there are no subcommands
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// The relay endpoint serving the quotation
    #[arg(
        short,
        long,
        env = "COTACAO_URL",
        default_value = "http://localhost:8080/cotacao"
    )]
    pub url: String,

    /// How long to wait for the relay (e.g. "300ms")
    #[arg(
        short,
        long,
        env = "COTACAO_TIMEOUT",
        default_value = "300ms",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,

    /// The file that receives the quotation line
    #[arg(short, long, env = "COTACAO_OUTPUT", default_value = "cotacao.txt")]
    pub output: PathBuf,
}

impl BaseArgs {
    /// Request the quotation once and report how it went.
    ///
    /// A relay timeout is logged and is not an error.
    pub async fn evaluate(self) -> anyhow::Result<()> {
        let requester = Requester::new(self.url, self.timeout, self.output)?;

        match requester.run().await? {
            Outcome::Written(line) => {
                event!(
                    Level::INFO,
                    output = %requester.output().display(),
                    "stored {line}"
                );
            }
            Outcome::TimedOut(deadline) => {
                event!(Level::WARN, ?deadline, "Request timed out");
            }
        }

        Ok(())
    }
}
