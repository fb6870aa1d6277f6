//! Host-supplied observer notified of installation outcomes.

use crate::error::InstallError;

/// Callback collaborator supplied by the host application to `install`.
///
/// Implementations must be cheap and non-blocking: backends invoke these
/// methods from their own worker tasks. Purchase outcomes are deliberately
/// not part of this trait; purchase-flow operations report failure through
/// their `Result` return values instead.
pub trait PurchaseObserver: Send + Sync {
    /// The backend bound its service and populated the information cache.
    fn handle_install(&self);

    /// The installation attempt failed terminally. The error carries the
    /// cause and the configuration the attempt ran with; re-invoking
    /// `install` is the only recovery.
    fn handle_install_error(&self, error: InstallError);
}
