use super::{PriceRepository, Repository};

/// The application-level glue handed to the relay as its state.
///
/// Implementations decide which repository backs the relay and how the
/// current time is obtained, which is what tests substitute.
pub trait Application {
    /// The persistence sink
    type Repository: PriceRepository;

    /// Get a reference to the sink
    fn database(&self) -> &Self::Repository;

    /// The timestamp to attach to a new observation
    fn now(&self) -> <Self::Repository as Repository>::DateTime;
}
