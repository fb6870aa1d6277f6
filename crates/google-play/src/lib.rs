//! `inapp-google-play` — Google Play billing backend for the purchase
//! manager contract.
//!
//! The backend binds an abstract [`service::BillingService`] (the seam where
//! a real binder transport plugs in), issues one SKU-details call per
//! install, and serves the result from an atomically swapped in-memory
//! cache. Purchases and restores are not implemented by this backend and
//! fail loudly.

pub mod cache;
pub mod connection;
pub mod installer;
pub mod manager;
pub mod mock;
pub mod protocol;
pub mod service;

pub use cache::InformationCache;
pub use connection::ConnectionState;
pub use installer::{installed_via_google_play, InstallerQuery, GOOGLE_PLAY_INSTALLER_PACKAGE};
pub use manager::{GooglePlayPurchaseManager, STORE_NAME_GOOGLE_PLAY};
pub use service::{BillingError, BillingService};
