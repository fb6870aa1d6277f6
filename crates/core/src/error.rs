//! Purchase-manager error model.

use thiserror::Error;

use crate::config::PurchaseManagerConfig;

/// Why an installation attempt failed.
#[derive(Debug, Error)]
pub enum InstallErrorKind {
    /// The billing service could not be bound.
    #[error("failed to bind billing service: {0}")]
    Bind(String),

    /// Fetching product information failed after the service was bound.
    #[error("failed to fetch product information: {source}")]
    Fetch {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Terminal failure of one `install` attempt.
///
/// Carries the configuration the attempt ran with, so observers can decide
/// whether and how to re-invoke `install`. Never thrown across the public
/// contract; always delivered via [`crate::PurchaseObserver::handle_install_error`].
#[derive(Debug, Error)]
#[error("purchase manager install failed ({}): {kind}", .config.summary())]
pub struct InstallError {
    pub kind: InstallErrorKind,
    pub config: PurchaseManagerConfig,
}

impl InstallError {
    /// Install failed because the service could not be bound.
    pub fn bind(reason: impl Into<String>, config: PurchaseManagerConfig) -> Self {
        Self {
            kind: InstallErrorKind::Bind(reason.into()),
            config,
        }
    }

    /// Install failed during the metadata fetch, wrapping the original cause.
    pub fn fetch(
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
        config: PurchaseManagerConfig,
    ) -> Self {
        Self {
            kind: InstallErrorKind::Fetch {
                source: source.into(),
            },
            config,
        }
    }
}

/// Failure of a purchase-flow operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// The backend does not implement this operation.
    ///
    /// Backends must fail loudly here instead of silently dropping the
    /// request, so callers notice the gap instead of waiting forever for an
    /// observer callback that will never come.
    #[error("{operation} is not supported by the {store} backend")]
    Unsupported {
        store: &'static str,
        operation: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Offer, OfferType};

    fn test_config() -> PurchaseManagerConfig {
        let mut config = PurchaseManagerConfig::new();
        config.add_offer(Offer::new("coins_100", OfferType::Consumable));
        config
    }

    #[test]
    fn bind_error_display_names_the_reason() {
        let err = InstallError::bind("service unavailable", test_config());
        let msg = err.to_string();
        assert!(msg.contains("failed to bind billing service"), "{msg}");
        assert!(msg.contains("service unavailable"), "{msg}");
        assert!(msg.contains("1 offer(s)"), "{msg}");
    }

    #[test]
    fn fetch_error_preserves_the_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "remote call timed out");
        let err = InstallError::fetch(cause, test_config());

        let InstallErrorKind::Fetch { source } = &err.kind else {
            panic!("expected Fetch kind");
        };
        assert!(source.to_string().contains("remote call timed out"));
    }

    #[test]
    fn unsupported_purchase_error_names_store_and_operation() {
        let err = PurchaseError::Unsupported {
            store: "GooglePlay",
            operation: "purchase",
        };
        assert_eq!(
            err.to_string(),
            "purchase is not supported by the GooglePlay backend"
        );
    }
}
