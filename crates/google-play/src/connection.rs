//! Billing service connection lifecycle.

/// Where the service binding currently stands.
///
/// One explicit state instead of nested platform connection callbacks;
/// reads may race an in-flight install and observe `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No binding exists (initial state, and after `dispose`).
    Disconnected,
    /// `connect` is in flight.
    Connecting,
    /// The service is bound and remote calls are valid.
    Connected,
    /// The last bind attempt failed terminally.
    Failed,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

/// Notification passed from the connection side into the fetch worker.
///
/// Bind failures are reported to the observer synchronously before a worker
/// is ever engaged, so a successful binding is the only event the worker
/// receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The service was bound; the catalog fetch may start.
    Connected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_connected_counts_as_connected() {
        assert!(ConnectionState::Connected.is_connected());
        assert!(!ConnectionState::Disconnected.is_connected());
        assert!(!ConnectionState::Connecting.is_connected());
        assert!(!ConnectionState::Failed.is_connected());
    }
}
