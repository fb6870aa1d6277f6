//! The purchase-manager capability contract.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PurchaseManagerConfig;
use crate::error::PurchaseError;
use crate::information::Information;
use crate::observer::PurchaseObserver;

/// Contract every store backend implements identically.
///
/// A backend owns one connection to its platform billing service and one
/// product-information cache. The cache is either empty (not installed) or
/// populated by the most recent completed fetch; `installed` reflects that.
#[async_trait]
pub trait PurchaseManager: Send + Sync {
    /// Constant identifying the store this backend talks to.
    fn store_name(&self) -> &'static str;

    /// Bind the platform billing service and fetch catalog metadata.
    ///
    /// Outcomes are reported through `observer`: `handle_install` on
    /// success, `handle_install_error` on any failure. Exactly one
    /// installation attempt runs per call; there is no retry policy.
    async fn install(
        &self,
        observer: Arc<dyn PurchaseObserver>,
        config: PurchaseManagerConfig,
        auto_fetch_information: bool,
    );

    /// Whether an install completed successfully since the last `dispose`.
    fn installed(&self) -> bool;

    /// Cancel in-flight work, unbind the service, clear the cache.
    ///
    /// Safe to call repeatedly; the service is only unbound while bound.
    async fn dispose(&self);

    /// Start a purchase flow for `identifier`.
    fn purchase(&self, identifier: &str) -> Result<(), PurchaseError>;

    /// Restore previously completed purchases.
    fn purchase_restore(&self) -> Result<(), PurchaseError>;

    /// Cached information for `identifier`; the unavailable sentinel when
    /// the cache has never seen it. Never fails.
    fn information(&self, identifier: &str) -> Information;
}
