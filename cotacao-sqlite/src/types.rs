//! Type definitions for the SQLite implementation.
//!
//! The public [`DateTime`] is the timestamp type the relay attaches to every
//! observation. `PriceRow` maps a row of `dolar_prices` and is internal.

use cotacao_core::models::PriceRecord;

mod datetime;
pub use datetime::DateTime;

#[derive(sqlx::FromRow)]
pub(crate) struct PriceRow {
    pub id: i64,
    pub price: f64,
    pub time: DateTime,
}

impl From<PriceRow> for PriceRecord<DateTime> {
    fn from(row: PriceRow) -> Self {
        PriceRecord {
            id: row.id,
            price: row.price,
            time: row.time,
        }
    }
}
