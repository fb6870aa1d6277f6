//! Google IAB v3 wire shapes and conversions.
//!
//! Field and key names follow the in-app billing protocol: the request is
//! the `ITEM_ID_LIST` bundle, the response carries `RESPONSE_CODE` and
//! `DETAILS_LIST`, and each detail entry is a JSON document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use inapp_core::{Information, PurchaseManagerConfig};

use crate::service::BillingError;

/// In-app billing API version this backend speaks.
pub const BILLING_API_VERSION: u32 = 3;

/// Product type constant for one-time in-app products.
pub const PURCHASE_TYPE_IN_APP: &str = "inapp";

/// Billing response code signalling success.
pub const BILLING_RESPONSE_RESULT_OK: i32 = 0;

/// One `getSkuDetails` remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuDetailsRequest {
    pub api_version: u32,
    /// Package name of the calling app.
    pub package_name: String,
    /// Product type to query (always [`PURCHASE_TYPE_IN_APP`] here).
    pub product_type: String,
    /// Product identifiers to look up (the `ITEM_ID_LIST` payload).
    pub item_id_list: Vec<String>,
}

/// Answer to a [`SkuDetailsRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkuDetailsResponse {
    /// Billing response code; `0` means OK.
    pub response_code: i32,
    /// One JSON detail document per known identifier (`DETAILS_LIST`).
    pub details_list: Vec<String>,
}

/// One parsed detail document from `DETAILS_LIST`.
#[derive(Debug, Clone, Deserialize)]
struct SkuDetails {
    #[serde(rename = "productId")]
    product_id: String,
    title: Option<String>,
    description: Option<String>,
    price: Option<String>,
    price_amount_micros: Option<u64>,
    price_currency_code: Option<String>,
}

impl From<SkuDetails> for Information {
    fn from(details: SkuDetails) -> Self {
        Information {
            local_name: details.title,
            local_description: details.description,
            local_pricing: details.price,
            price_amount_micros: details.price_amount_micros,
            price_currency_code: details.price_currency_code,
        }
    }
}

/// Build the SKU lookup request for the configured catalog.
pub fn sku_details_request(package_name: &str, config: &PurchaseManagerConfig) -> SkuDetailsRequest {
    SkuDetailsRequest {
        api_version: BILLING_API_VERSION,
        package_name: package_name.to_string(),
        product_type: PURCHASE_TYPE_IN_APP.to_string(),
        item_id_list: config.identifiers(),
    }
}

/// Convert a SKU details response into the information mapping.
///
/// A non-OK response code or any malformed detail document fails the whole
/// conversion; the install flow treats that as a fetch failure and leaves
/// the previous cache generation untouched.
pub fn information_from_response(
    response: &SkuDetailsResponse,
) -> Result<HashMap<String, Information>, BillingError> {
    if response.response_code != BILLING_RESPONSE_RESULT_OK {
        return Err(BillingError::ResponseCode(response.response_code));
    }

    let mut map = HashMap::with_capacity(response.details_list.len());
    for raw in &response.details_list {
        let details: SkuDetails = serde_json::from_str(raw)?;
        map.insert(details.product_id.clone(), Information::from(details));
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inapp_core::{Offer, OfferType};

    fn detail_json(id: &str, title: &str, price: &str) -> String {
        serde_json::json!({
            "productId": id,
            "type": "inapp",
            "title": title,
            "description": format!("{title} description"),
            "price": price,
            "price_amount_micros": 990_000u64,
            "price_currency_code": "USD",
        })
        .to_string()
    }

    #[test]
    fn request_carries_api_version_type_and_identifiers() {
        let mut config = PurchaseManagerConfig::new();
        config
            .add_offer(Offer::new("coins_100", OfferType::Consumable))
            .add_offer(Offer::new("premium", OfferType::Entitlement))
            .add_offer(Offer::new("coins_100", OfferType::Consumable));

        let request = sku_details_request("com.example.game", &config);

        assert_eq!(request.api_version, BILLING_API_VERSION);
        assert_eq!(request.package_name, "com.example.game");
        assert_eq!(request.product_type, PURCHASE_TYPE_IN_APP);
        assert_eq!(request.item_id_list, vec!["coins_100", "premium"]);
    }

    #[test]
    fn ok_response_converts_every_detail_document() {
        let response = SkuDetailsResponse {
            response_code: BILLING_RESPONSE_RESULT_OK,
            details_list: vec![
                detail_json("coins_100", "100 Coins", "$0.99"),
                detail_json("premium", "Premium Upgrade", "$4.99"),
            ],
        };

        let map = information_from_response(&response).unwrap();
        assert_eq!(map.len(), 2);

        let coins = &map["coins_100"];
        assert_eq!(coins.local_name.as_deref(), Some("100 Coins"));
        assert_eq!(coins.local_pricing.as_deref(), Some("$0.99"));
        assert_eq!(coins.price_amount_micros, Some(990_000));
        assert_eq!(coins.price_currency_code.as_deref(), Some("USD"));
    }

    #[test]
    fn non_ok_response_code_is_an_error() {
        let response = SkuDetailsResponse {
            response_code: 6,
            details_list: vec![],
        };

        match information_from_response(&response) {
            Err(BillingError::ResponseCode(6)) => {}
            other => panic!("expected ResponseCode(6), got {other:?}"),
        }
    }

    #[test]
    fn malformed_detail_document_is_an_error() {
        let response = SkuDetailsResponse {
            response_code: BILLING_RESPONSE_RESULT_OK,
            details_list: vec!["not json".to_string()],
        };

        match information_from_response(&response) {
            Err(BillingError::MalformedDetails(_)) => {}
            other => panic!("expected MalformedDetails, got {other:?}"),
        }
    }

    #[test]
    fn detail_without_pricing_fields_still_converts() {
        let response = SkuDetailsResponse {
            response_code: BILLING_RESPONSE_RESULT_OK,
            details_list: vec![r#"{"productId":"bare"}"#.to_string()],
        };

        let map = information_from_response(&response).unwrap();
        assert!(!map["bare"].is_available());
    }

    #[test]
    fn empty_response_converts_to_empty_map() {
        let response = SkuDetailsResponse::default();
        assert!(information_from_response(&response).unwrap().is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every well-formed detail document yields exactly one
            /// entry keyed by its product id, with matching fields.
            #[test]
            fn conversion_is_lossless_per_product(
                catalog in proptest::collection::hash_map(
                    "[a-z][a-z0-9_.]{0,19}",
                    ("[A-Za-z][A-Za-z0-9 ]{0,30}", 1u64..100_000_000),
                    0..8,
                )
            ) {
                let details_list: Vec<String> = catalog
                    .iter()
                    .map(|(id, (title, micros))| {
                        serde_json::json!({
                            "productId": id,
                            "title": title,
                            "price_amount_micros": micros,
                        })
                        .to_string()
                    })
                    .collect();

                let response = SkuDetailsResponse {
                    response_code: BILLING_RESPONSE_RESULT_OK,
                    details_list,
                };

                let map = information_from_response(&response).unwrap();
                prop_assert_eq!(map.len(), catalog.len());

                for (id, (title, micros)) in &catalog {
                    let info = &map[id];
                    prop_assert_eq!(info.local_name.as_deref(), Some(title.as_str()));
                    prop_assert_eq!(info.price_amount_micros, Some(*micros));
                }
            }
        }
    }
}
