use std::fmt::Display;

/// The line the requester writes to its output artifact.
///
/// The price is rendered in fixed-point with six decimals, e.g.
/// `Dolar: 5.432100`. There is no trailing newline: the artifact holds this
/// line and nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredQuoteLine {
    /// The bid received from the relay
    pub price: f64,
}

impl From<f64> for StoredQuoteLine {
    fn from(price: f64) -> Self {
        Self { price }
    }
}

impl Display for StoredQuoteLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dolar: {:.6}", self.price)
    }
}
