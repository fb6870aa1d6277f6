//! Distribution-channel detection.
//!
//! Used by host frameworks for store auto-configuration: an app installed
//! through Google Play should pick this backend without being told.

use tracing::warn;

/// Installer package name reported for apps distributed via Google Play.
pub const GOOGLE_PLAY_INSTALLER_PACKAGE: &str = "com.android.vending";

/// Platform query for the package that installed an app.
///
/// On Android this wraps the package manager's installer lookup; tests use
/// [`crate::mock::MockInstallerQuery`]. Causes are heterogeneous platform
/// failures, hence `anyhow`.
pub trait InstallerQuery: Send + Sync {
    /// Installer package name for `package`, or `None` when unknown
    /// (sideloaded, debug build, ...).
    fn installer_package_name(&self, package: &str) -> anyhow::Result<Option<String>>;
}

/// Whether `package` was installed through the Google Play channel.
///
/// Query failures are swallowed: they are logged and reported as "not
/// installed via this channel", never propagated. Auto-configuration must
/// not crash the host over unreadable installer metadata.
pub fn installed_via_google_play(query: &dyn InstallerQuery, package: &str) -> bool {
    match query.installer_package_name(package) {
        Ok(Some(installer)) => installer == GOOGLE_PLAY_INSTALLER_PACKAGE,
        Ok(None) => false,
        Err(err) => {
            warn!(package, error = %err, "cannot determine installer package name");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockInstallerQuery;

    #[test]
    fn play_installer_package_is_detected() {
        let query = MockInstallerQuery::installed_by(GOOGLE_PLAY_INSTALLER_PACKAGE);
        assert!(installed_via_google_play(&query, "com.example.game"));
    }

    #[test]
    fn other_installer_is_not_the_play_channel() {
        let query = MockInstallerQuery::installed_by("com.amazon.venezia");
        assert!(!installed_via_google_play(&query, "com.example.game"));
    }

    #[test]
    fn sideloaded_app_has_no_channel() {
        let query = MockInstallerQuery::sideloaded();
        assert!(!installed_via_google_play(&query, "com.example.game"));
    }

    #[test]
    fn query_failure_is_swallowed_as_false() {
        let query = MockInstallerQuery::failing("package manager unreachable");
        assert!(!installed_via_google_play(&query, "com.example.game"));
    }
}
