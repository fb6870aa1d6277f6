//! `inapp-core` — store-agnostic in-app purchase building blocks.
//!
//! This crate contains the **purchase-manager contract** shared by every
//! store backend (catalog configuration, product information, observer and
//! manager traits). No IO and no store-specific wire formats live here.

pub mod config;
pub mod error;
pub mod information;
pub mod manager;
pub mod observer;

pub use config::{Offer, OfferType, PurchaseManagerConfig};
pub use error::{InstallError, InstallErrorKind, PurchaseError};
pub use information::Information;
pub use manager::PurchaseManager;
pub use observer::PurchaseObserver;
