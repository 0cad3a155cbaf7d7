#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the cotacao-sqlite crate.
//! [cotacao_core]: https://docs.rs/cotacao_core/latest/cotacao_core/index.html
//! [cotacao_sqlite]: https://docs.rs/cotacao_sqlite/latest/cotacao_sqlite/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// Errors produced by the SQLite sink.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from SQLite operations
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),

    /// Error while ensuring the schema exists
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The operation did not complete within its deadline and was abandoned
    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// SQLite database implementation of the price repository.
///
/// This struct provides separate reader and writer connection pools to a SQLite database.
/// The writer is capped to a single connection, so concurrent inserts from
/// independent requests queue up behind each other rather than contend for
/// the database lock.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations, ensuring serialized writes
///
/// # Example
///
/// ```no_run
/// # use cotacao_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SqliteConfig::file("quotations.db");
/// let db = Db::open(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing` is true)
    /// and ensures the `dolar_prices` table exists. Opening a database that
    /// already holds the table, including one created outside of this crate,
    /// leaves its rows untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if:
    /// - Database connection fails
    /// - The schema cannot be applied
    pub async fn open(config: &SqliteConfig) -> Result<Self, Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        // The migration uses `create table if not exists`, so this is a no-op
        // for databases that already carry the table.
        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::debug!(
            path = db_path.as_deref().unwrap_or(":memory:"),
            "price store ready"
        );

        Ok(Self { reader, writer })
    }
}
