//! Localized product metadata returned by a store backend.

use serde::{Deserialize, Serialize};

/// Descriptive metadata for a purchasable product, as reported by the store.
///
/// All fields are optional: a backend populates what its catalog response
/// carries. The [`Information::unavailable`] sentinel stands in for products
/// the backend has never reported; lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Information {
    /// Localized product title.
    pub local_name: Option<String>,
    /// Localized product description.
    pub local_description: Option<String>,
    /// Localized, formatted price string (e.g. `"€2,99"`).
    pub local_pricing: Option<String>,
    /// Price in micro-units of the currency (1,000,000 micros = 1 unit).
    pub price_amount_micros: Option<u64>,
    /// ISO 4217 currency code for the price.
    pub price_currency_code: Option<String>,
}

impl Information {
    /// Sentinel returned when a product identifier is unknown to the cache.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Whether this entry carries any store-reported data.
    ///
    /// The unavailable sentinel reports `false`.
    pub fn is_available(&self) -> bool {
        self.local_name.is_some()
            || self.local_description.is_some()
            || self.local_pricing.is_some()
            || self.price_amount_micros.is_some()
            || self.price_currency_code.is_some()
    }
}
