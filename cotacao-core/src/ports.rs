use std::fmt::Display;

mod application;
mod price;

pub use application::Application;
pub use price::PriceRepository;

/// The base trait every repository implementation must satisfy.
///
/// It fixes the error and timestamp types so the other repository traits can
/// refer to them without repeating the bounds.
pub trait Repository: Send + Sync {
    /// The error produced by the underlying store
    type Error: std::error::Error + Send + Sync + 'static;

    /// The timestamp type the store persists
    type DateTime: Clone + Display + Send + Sync + 'static;
}
