//! Mock implementations for testing.
//!
//! Scriptable stand-ins for the billing service and the platform installer
//! query, with deterministic behavior for automated tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::protocol::{SkuDetailsRequest, SkuDetailsResponse};
use crate::service::{BillingError, BillingService};

/// In-memory billing service with scriptable failures.
///
/// By default every call succeeds and `sku_details` answers with the
/// configured detail documents. Failures are injected per call site.
#[derive(Default)]
pub struct MockBillingService {
    connect_failure: Mutex<Option<String>>,
    sku_details_failure: Mutex<Option<String>>,
    response_code: Mutex<i32>,
    details: Mutex<Vec<String>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    sku_details_calls: AtomicUsize,
    last_request: Mutex<Option<SkuDetailsRequest>>,
}

impl MockBillingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these JSON detail documents from `sku_details`.
    pub fn respond_with(&self, details: Vec<String>) {
        *self.details.lock().unwrap() = details;
    }

    /// Answer `sku_details` with this billing response code.
    pub fn set_response_code(&self, code: i32) {
        *self.response_code.lock().unwrap() = code;
    }

    /// Make the next `connect` calls fail with this reason.
    pub fn fail_connect(&self, reason: impl Into<String>) {
        *self.connect_failure.lock().unwrap() = Some(reason.into());
    }

    /// Make the next `sku_details` calls fail with this reason.
    pub fn fail_sku_details(&self, reason: impl Into<String>) {
        *self.sku_details_failure.lock().unwrap() = Some(reason.into());
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    pub fn sku_details_calls(&self) -> usize {
        self.sku_details_calls.load(Ordering::SeqCst)
    }

    /// The most recent request seen by `sku_details`.
    pub fn last_request(&self) -> Option<SkuDetailsRequest> {
        self.last_request.lock().unwrap().clone()
    }

    /// Build a well-formed detail document for tests.
    pub fn detail_json(id: &str, title: &str, price: &str) -> String {
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
}

#[async_trait]
impl BillingService for MockBillingService {
    async fn connect(&self) -> Result<(), BillingError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.connect_failure.lock().unwrap().clone() {
            return Err(BillingError::Unavailable(reason));
        }
        Ok(())
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    async fn sku_details(
        &self,
        request: SkuDetailsRequest,
    ) -> Result<SkuDetailsResponse, BillingError> {
        self.sku_details_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        if let Some(reason) = self.sku_details_failure.lock().unwrap().clone() {
            return Err(BillingError::Remote(reason));
        }

        Ok(SkuDetailsResponse {
            response_code: *self.response_code.lock().unwrap(),
            details_list: self.details.lock().unwrap().clone(),
        })
    }
}

impl std::fmt::Debug for MockBillingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBillingService")
            .field("connects", &self.connects())
            .field("disconnects", &self.disconnects())
            .field("sku_details_calls", &self.sku_details_calls())
            .finish()
    }
}

/// Scriptable installer-channel query.
#[derive(Debug, Clone)]
pub struct MockInstallerQuery {
    installer: Option<String>,
    failure: Option<String>,
}

impl MockInstallerQuery {
    /// The app was installed by `installer`.
    pub fn installed_by(installer: impl Into<String>) -> Self {
        Self {
            installer: Some(installer.into()),
            failure: None,
        }
    }

    /// The app has no recorded installer (sideloaded).
    pub fn sideloaded() -> Self {
        Self {
            installer: None,
            failure: None,
        }
    }

    /// The platform query itself fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            installer: None,
            failure: Some(reason.into()),
        }
    }
}

impl crate::installer::InstallerQuery for MockInstallerQuery {
    fn installer_package_name(&self, _package: &str) -> anyhow::Result<Option<String>> {
        if let Some(reason) = &self.failure {
            anyhow::bail!("{reason}");
        }
        Ok(self.installer.clone())
    }
}
