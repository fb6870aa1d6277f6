//! Google Play purchase manager.

use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use inapp_core::{
    Information, InstallError, PurchaseError, PurchaseManager, PurchaseManagerConfig,
    PurchaseObserver,
};

use crate::cache::InformationCache;
use crate::connection::{ConnectionEvent, ConnectionState};
use crate::protocol;
use crate::service::{BillingError, BillingService};

/// Store name reported by this backend.
pub const STORE_NAME_GOOGLE_PLAY: &str = "GooglePlay";

/// One running installation attempt.
struct InstallTask {
    handle: JoinHandle<()>,
    shutdown: Arc<Notify>,
}

/// Purchase manager backed by the Google Play in-app billing service.
///
/// Owns the connection state and the information cache; the billing
/// transport itself is injected as a [`BillingService`]. Each `install`
/// runs at most one fetch worker, and `dispose` cancels whatever is still
/// in flight.
pub struct GooglePlayPurchaseManager {
    service: Arc<dyn BillingService>,
    package_name: String,
    cache: InformationCache,
    state: Arc<RwLock<ConnectionState>>,
    active: Mutex<Option<InstallTask>>,
}

impl GooglePlayPurchaseManager {
    pub fn new(service: Arc<dyn BillingService>, package_name: impl Into<String>) -> Self {
        Self {
            service,
            package_name: package_name.into(),
            cache: InformationCache::new(),
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            active: Mutex::new(None),
        }
    }

    /// Current connection state (reads may race an in-flight install).
    pub fn connection_state(&self) -> ConnectionState {
        *self.state.read().expect("connection state lock poisoned")
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.write().expect("connection state lock poisoned") = state;
    }

    /// Cancel the previous installation attempt, if one is still running.
    fn cancel_active(&self) {
        let task = self.active.lock().expect("install task lock poisoned").take();
        if let Some(task) = task {
            task.shutdown.notify_one();
            task.handle.abort();
        }
    }

    /// Store the new installation attempt, cancelling whichever attempt was
    /// stored before.
    ///
    /// Take, cancel, and store happen under one lock so concurrent installs
    /// can never leave two live workers behind: whoever stores last cancels
    /// the other.
    fn replace_active(&self, task: InstallTask) {
        let mut active = self.active.lock().expect("install task lock poisoned");
        if let Some(prev) = active.take() {
            prev.shutdown.notify_one();
            prev.handle.abort();
        }
        *active = Some(task);
    }
}

#[async_trait]
impl PurchaseManager for GooglePlayPurchaseManager {
    fn store_name(&self) -> &'static str {
        STORE_NAME_GOOGLE_PLAY
    }

    async fn install(
        &self,
        observer: Arc<dyn PurchaseObserver>,
        config: PurchaseManagerConfig,
        auto_fetch_information: bool,
    ) {
        // The Play backend always fetches the catalog; the flag exists for
        // contract parity with backends that can defer it.
        let _ = auto_fetch_information;

        self.cancel_active();
        self.set_state(ConnectionState::Connecting);

        if let Err(err) = self.service.connect().await {
            self.set_state(ConnectionState::Failed);
            warn!(error = %err, "billing service bind failed");
            observer.handle_install_error(InstallError::bind(err.to_string(), config));
            return;
        }
        self.set_state(ConnectionState::Connected);
        debug!(package = %self.package_name, "billing service bound");

        let shutdown = Arc::new(Notify::new());
        let (events_tx, events_rx) = mpsc::channel(1);

        let worker = fetch_worker(
            self.service.clone(),
            self.package_name.clone(),
            self.cache.clone(),
            observer,
            config,
            shutdown.clone(),
            events_rx,
        );
        let handle = tokio::spawn(worker);
        self.replace_active(InstallTask { handle, shutdown });

        // Hand the bound connection over to the worker.
        let _ = events_tx.send(ConnectionEvent::Connected).await;
    }

    fn installed(&self) -> bool {
        !self.cache.is_empty()
    }

    async fn dispose(&self) {
        self.cancel_active();

        if self.connection_state().is_connected() {
            self.service.disconnect().await;
            debug!("billing service unbound");
        }
        self.set_state(ConnectionState::Disconnected);
        self.cache.clear();
    }

    fn purchase(&self, identifier: &str) -> Result<(), PurchaseError> {
        warn!(identifier, "purchase requested but not implemented by this backend");
        Err(PurchaseError::Unsupported {
            store: STORE_NAME_GOOGLE_PLAY,
            operation: "purchase",
        })
    }

    fn purchase_restore(&self) -> Result<(), PurchaseError> {
        warn!("purchase restore requested but not implemented by this backend");
        Err(PurchaseError::Unsupported {
            store: STORE_NAME_GOOGLE_PLAY,
            operation: "purchase restore",
        })
    }

    fn information(&self, identifier: &str) -> Information {
        self.cache.get(identifier)
    }
}

/// Background worker for one installation attempt.
///
/// Waits for the connection notification, performs the single SKU-details
/// call, and reports the outcome to the observer. Cancelled through
/// `shutdown` when the manager is disposed or a new install starts.
async fn fetch_worker(
    service: Arc<dyn BillingService>,
    package_name: String,
    cache: InformationCache,
    observer: Arc<dyn PurchaseObserver>,
    config: PurchaseManagerConfig,
    shutdown: Arc<Notify>,
    mut events: mpsc::Receiver<ConnectionEvent>,
) {
    tokio::select! {
        _ = shutdown.notified() => {
            debug!("install worker cancelled");
        }
        event = events.recv() => {
            if let Some(ConnectionEvent::Connected) = event {
                match fetch_information(service.as_ref(), &package_name, &config).await {
                    Ok(entries) => {
                        debug!(products = entries.len(), "product information fetched");
                        cache.replace(entries);
                        observer.handle_install();
                    }
                    Err(err) => {
                        warn!(error = %err, "product information fetch failed");
                        observer.handle_install_error(InstallError::fetch(err, config));
                    }
                }
            }
        }
    }
}

async fn fetch_information(
    service: &dyn BillingService,
    package_name: &str,
    config: &PurchaseManagerConfig,
) -> Result<std::collections::HashMap<String, Information>, BillingError> {
    let request = protocol::sku_details_request(package_name, config);
    debug!(items = request.item_id_list.len(), "requesting sku details");
    let response = service.sku_details(request).await?;
    protocol::information_from_response(&response)
}
