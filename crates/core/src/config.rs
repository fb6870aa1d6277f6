//! Purchase manager configuration: the host-owned product catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How an offer behaves once purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// Can be purchased repeatedly (e.g. coins).
    Consumable,
    /// Purchased once, owned forever (e.g. level pack).
    Entitlement,
    /// Recurring purchase managed by the store.
    Subscription,
}

/// A single purchasable product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    identifier: String,
    offer_type: OfferType,
}

impl Offer {
    pub fn new(identifier: impl Into<String>, offer_type: OfferType) -> Self {
        Self {
            identifier: identifier.into(),
            offer_type,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn offer_type(&self) -> OfferType {
        self.offer_type
    }
}

/// Read-only description of which products a backend should query, plus
/// per-store string parameters (e.g. a store public key).
///
/// Owned and supplied by the host application; backends never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseManagerConfig {
    offers: Vec<Offer>,
    store_params: HashMap<String, String>,
}

impl PurchaseManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an offer to the catalog. Offers keep their insertion order.
    pub fn add_offer(&mut self, offer: Offer) -> &mut Self {
        self.offers.push(offer);
        self
    }

    /// Attach a store-specific parameter (e.g. a license key).
    pub fn add_store_param(&mut self, store: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.store_params.insert(store.into(), value.into());
        self
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn offer(&self, identifier: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.identifier() == identifier)
    }

    pub fn store_param(&self, store: &str) -> Option<&str> {
        self.store_params.get(store).map(String::as_str)
    }

    /// Unique product identifiers in insertion order.
    ///
    /// Duplicate offers for the same identifier are collapsed so a catalog
    /// query never asks the store for the same product twice.
    pub fn identifiers(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.offers.len());
        for offer in &self.offers {
            if !seen.iter().any(|id| id == offer.identifier()) {
                seen.push(offer.identifier().to_string());
            }
        }
        seen
    }

    /// Short human-readable summary used in error messages.
    pub fn summary(&self) -> String {
        format!("{} offer(s)", self.offers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_preserve_insertion_order() {
        let mut config = PurchaseManagerConfig::new();
        config
            .add_offer(Offer::new("coins_100", OfferType::Consumable))
            .add_offer(Offer::new("premium", OfferType::Entitlement))
            .add_offer(Offer::new("season_pass", OfferType::Subscription));

        assert_eq!(config.identifiers(), vec!["coins_100", "premium", "season_pass"]);
    }

    #[test]
    fn identifiers_collapse_duplicates() {
        let mut config = PurchaseManagerConfig::new();
        config
            .add_offer(Offer::new("coins_100", OfferType::Consumable))
            .add_offer(Offer::new("coins_100", OfferType::Consumable))
            .add_offer(Offer::new("premium", OfferType::Entitlement));

        assert_eq!(config.identifiers(), vec!["coins_100", "premium"]);
    }

    #[test]
    fn offer_lookup_by_identifier() {
        let mut config = PurchaseManagerConfig::new();
        config.add_offer(Offer::new("premium", OfferType::Entitlement));

        let offer = config.offer("premium").unwrap();
        assert_eq!(offer.offer_type(), OfferType::Entitlement);
        assert!(config.offer("missing").is_none());
    }

    #[test]
    fn store_params_round_trip() {
        let mut config = PurchaseManagerConfig::new();
        config.add_store_param("GooglePlay", "license-key");

        assert_eq!(config.store_param("GooglePlay"), Some("license-key"));
        assert_eq!(config.store_param("Amazon"), None);
    }
}
