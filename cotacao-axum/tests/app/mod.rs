use cotacao_core::{
    models::PriceRecord,
    ports::{Application, PriceRepository, Repository},
};
use cotacao_sqlite::{Db, types::DateTime};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// The relay backed by a real (in-memory) SQLite sink.
#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        DateTime::now()
    }
}

/// A sink that is down: every insert fails, but the attempt is remembered.
#[derive(Clone, Default)]
pub struct UnavailableSink {
    pub attempts: Arc<Mutex<Vec<f64>>>,
}

#[derive(Debug, thiserror::Error)]
#[error("sink unavailable")]
pub struct Unavailable;

impl Repository for UnavailableSink {
    type Error = Unavailable;
    type DateTime = u64;
}

impl PriceRepository for UnavailableSink {
    async fn record_price(
        &self,
        price: f64,
        _as_of: u64,
        _deadline: Duration,
    ) -> Result<PriceRecord<u64>, Unavailable> {
        self.attempts.lock().unwrap().push(price);
        Err(Unavailable)
    }

    async fn recent_prices(&self, _limit: usize) -> Result<Vec<PriceRecord<u64>>, Unavailable> {
        Err(Unavailable)
    }
}

#[derive(Clone, Default)]
pub struct UnavailableApp(pub UnavailableSink);

impl Application for UnavailableApp {
    type Repository = UnavailableSink;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> u64 {
        0
    }
}
