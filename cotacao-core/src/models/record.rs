/// A persisted price observation.
///
/// One record is written for every successful upstream fetch, whether or not
/// the caller ultimately receives the response. Records are never updated or
/// deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord<DateTime> {
    /// The identity assigned by the store
    pub id: i64,
    /// The extracted bid (`0.0` if the payload could not be read)
    pub price: f64,
    /// When the observation was captured
    pub time: DateTime,
}
