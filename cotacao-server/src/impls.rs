//! The concrete application handed to the relay router.

use cotacao_core::ports::Application;
use cotacao_sqlite::{Db, types::DateTime};

/// The production relay: a SQLite price store and the wall clock.
#[derive(Clone)]
pub struct RelayApp {
    /// The price store
    pub db: Db,
}

impl Application for RelayApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        DateTime::now()
    }
}
