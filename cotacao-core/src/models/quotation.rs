use super::QuoteBook;
use serde::Deserialize;

/// The only currency pair this system relays.
pub const PAIR: &str = "USDBRL";

/// A single quotation as served by the upstream price API.
///
/// The upstream payload carries many more fields (`high`, `low`, `timestamp`,
/// ...), which are ignored. Only the bid participates in any computation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Quotation {
    /// The pair code, e.g. `USD`
    #[serde(default)]
    pub code: String,
    /// The human-readable pair name, e.g. `Dólar Americano/Real Brasileiro`
    #[serde(default)]
    pub name: String,
    /// The bid price, as a decimal string
    #[serde(default)]
    pub bid: String,
}

impl Quotation {
    /// Parse the bid, if it is a finite, non-negative real number.
    pub fn price(&self) -> Option<f64> {
        parse_bid(&self.bid)
    }
}

fn parse_bid(bid: &str) -> Option<f64> {
    bid.parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Extract the `USDBRL` bid from a raw upstream payload.
///
/// This never fails: a body that is not a valid quotation mapping, lacks the
/// `USDBRL` key or carries an unparseable bid yields `0.0`. Callers persist
/// that value like any other.
pub fn extract_bid(body: &[u8]) -> f64 {
    serde_json::from_slice::<QuoteBook>(body)
        .ok()
        .and_then(|book| book.get(PAIR).and_then(Quotation::price))
        .unwrap_or(0.0)
}

/// Reasons the requester may fail to read a bid out of the relay's answer.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not JSON of any accepted shape
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is a quotation mapping without the expected pair
    #[error("payload has no quotation for {0}")]
    MissingPair(&'static str),

    /// The bid is present but is not a non-negative number
    #[error("invalid bid {0:?}")]
    InvalidBid(String),
}

// The relay forwards the upstream body verbatim, but a flat `{"bid": ...}`
// object is accepted as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum RelayPayload {
    Flat { bid: BidValue },
    Book(QuoteBook),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BidValue {
    Number(f64),
    Text(String),
}

/// Decode the bid from the relay's answer.
///
/// Unlike [`extract_bid`], any failure is reported to the caller.
pub fn decode_bid(body: &[u8]) -> Result<f64, DecodeError> {
    match serde_json::from_slice::<RelayPayload>(body)? {
        RelayPayload::Flat {
            bid: BidValue::Number(price),
        } => {
            if price.is_finite() && price >= 0.0 {
                Ok(price)
            } else {
                Err(DecodeError::InvalidBid(price.to_string()))
            }
        }
        RelayPayload::Flat {
            bid: BidValue::Text(bid),
        } => parse_bid(&bid).ok_or(DecodeError::InvalidBid(bid)),
        RelayPayload::Book(book) => {
            let quotation = book.get(PAIR).ok_or(DecodeError::MissingPair(PAIR))?;
            quotation
                .price()
                .ok_or_else(|| DecodeError::InvalidBid(quotation.bid.clone()))
        }
    }
}
