//! Abstract billing service seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::protocol::{SkuDetailsRequest, SkuDetailsResponse};

/// Failure talking to the billing service.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The service could not be bound (not installed, binder refused, ...).
    #[error("billing service unavailable: {0}")]
    Unavailable(String),

    /// A bound remote call failed.
    #[error("remote billing call failed: {0}")]
    Remote(String),

    /// The service answered with a non-OK billing response code.
    #[error("billing service returned response code {0}")]
    ResponseCode(i32),

    /// A SKU detail document in the response could not be parsed.
    #[error("malformed sku details payload: {0}")]
    MalformedDetails(#[from] serde_json::Error),
}

/// Remote interface to the platform in-app billing service.
///
/// Implementations own the transport (on Android, a binder connection to
/// `com.android.vending`); [`crate::mock::MockBillingService`] scripts it
/// for tests. `connect`/`disconnect` bracket the connection lifetime; a
/// [`SkuDetailsRequest`] is only valid between them.
#[async_trait]
pub trait BillingService: Send + Sync {
    /// Bind the service. Maps onto the platform's service-connection
    /// callback; resolves once the connection is usable or failed.
    async fn connect(&self) -> Result<(), BillingError>;

    /// Unbind the service. Must tolerate being called while unbound.
    async fn disconnect(&self);

    /// Fetch catalog metadata for every identifier in the request.
    async fn sku_details(&self, request: SkuDetailsRequest)
        -> Result<SkuDetailsResponse, BillingError>;
}
