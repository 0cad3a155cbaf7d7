use crate::models::PriceRecord;
use std::{future::Future, time::Duration};

/// Repository interface for the append-only log of observed prices.
pub trait PriceRepository: super::Repository {
    /// Append a new observation.
    ///
    /// The insert must complete within `deadline`, measured from the call.
    /// If it cannot, the implementation returns an error and no partial row
    /// may become visible.
    ///
    /// An error is not proof that nothing was stored: the deadline may fire
    /// after the store has already accepted the commit, in which case the
    /// row is visible even though an error was returned.
    fn record_price(
        &self,
        price: f64,
        as_of: Self::DateTime,
        deadline: Duration,
    ) -> impl Future<Output = Result<PriceRecord<Self::DateTime>, Self::Error>> + Send;

    /// Retrieve up to `limit` observations, newest first.
    fn recent_prices(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<PriceRecord<Self::DateTime>>, Self::Error>> + Send;
}
