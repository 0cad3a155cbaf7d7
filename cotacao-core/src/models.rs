mod line;
mod quotation;
mod record;

pub use line::StoredQuoteLine;
pub use quotation::{DecodeError, PAIR, Quotation, decode_bid, extract_bid};
pub use record::PriceRecord;

macro_rules! map_wrapper {
    ($struct:ident, $key:ty, $value:ty) => {
        /// A hashmap with deterministic ordering
        #[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $struct(pub indexmap::IndexMap<$key, $value, rustc_hash::FxBuildHasher>);

        impl std::ops::Deref for $struct {
            type Target = indexmap::IndexMap<$key, $value, rustc_hash::FxBuildHasher>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

// The upstream API answers with an object keyed by pair code, e.g. `{"USDBRL": {...}}`
map_wrapper!(QuoteBook, String, Quotation);
