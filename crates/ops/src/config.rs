//! Environment snapshot for deployment operations.
//!
//! The relevant environment variables are read exactly once at startup;
//! every component receives the snapshot explicitly instead of consulting
//! the process environment itself.

use std::env;

/// Environment variable selecting the deployment mode.
pub const APP_ENV: &str = "APP_ENV";
/// Environment variable listing optional bundles to install, comma-separated.
pub const AUTOINSTALL_BUNDLES: &str = "AUTOINSTALL_BUNDLES";
/// Environment variable pointing the installer at its configuration directory.
pub const CONFIGURATION_DIRECTORY: &str = "PIMCORE_CONFIGURATION_DIRECTORY";

/// Installer configuration directory used when the variable is unset.
pub const DEFAULT_CONFIGURATION_DIRECTORY: &str = "config/pimcore";

/// Snapshot of the deployment-relevant process environment.
#[derive(Debug, Clone, Default)]
pub struct DeployEnv {
    /// Deployment mode (`prod` selects production behavior).
    pub app_env: Option<String>,
    /// Raw comma-separated list of bundles to auto-install.
    pub autoinstall_bundles: Option<String>,
    /// Configuration directory handed to the installer.
    pub configuration_directory: Option<String>,
}

impl DeployEnv {
    /// Snapshots the relevant environment variables.
    pub fn from_env() -> Self {
        Self {
            app_env: env::var(APP_ENV).ok(),
            autoinstall_bundles: env::var(AUTOINSTALL_BUNDLES).ok(),
            configuration_directory: env::var(CONFIGURATION_DIRECTORY).ok(),
        }
    }

    /// True when the snapshot declares the production deployment mode.
    pub fn is_production(&self) -> bool {
        self.app_env.as_deref() == Some(pimops_check::PRODUCTION_ENV)
    }

    /// Bundle names to auto-install, in declaration order.
    ///
    /// Empty entries from stray commas are dropped; an unset variable
    /// yields no bundles.
    pub fn bundles(&self) -> Vec<String> {
        self.autoinstall_bundles
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Configuration directory handed to the installer.
    pub fn configuration_directory(&self) -> &str {
        self.configuration_directory
            .as_deref()
            .unwrap_or(DEFAULT_CONFIGURATION_DIRECTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn bundles_split_on_commas_and_drop_empty_entries() {
        let env = DeployEnv {
            autoinstall_bundles: Some("AlphaBundle,,BetaBundle".to_string()),
            ..Default::default()
        };
        assert_eq!(env.bundles(), vec!["AlphaBundle", "BetaBundle"]);
    }

    #[test]
    fn unset_bundle_list_installs_nothing() {
        assert!(DeployEnv::default().bundles().is_empty());
    }

    #[test]
    fn production_mode_requires_exact_literal() {
        let prod = DeployEnv {
            app_env: Some("prod".to_string()),
            ..Default::default()
        };
        let dev = DeployEnv {
            app_env: Some("dev".to_string()),
            ..Default::default()
        };
        assert!(prod.is_production());
        assert!(!dev.is_production());
        assert!(!DeployEnv::default().is_production());
    }

    #[test]
    fn configuration_directory_falls_back_to_default() {
        assert_eq!(
            DeployEnv::default().configuration_directory(),
            DEFAULT_CONFIGURATION_DIRECTORY
        );
        let env = DeployEnv {
            configuration_directory: Some("etc/pimcore".to_string()),
            ..Default::default()
        };
        assert_eq!(env.configuration_directory(), "etc/pimcore");
    }

    #[test]
    fn from_env_snapshots_the_process_environment() {
        let _guard = test_support::env_guard();
        let original = std::env::var(APP_ENV).ok();

        std::env::set_var(APP_ENV, "prod");
        let env = DeployEnv::from_env();
        assert_eq!(env.app_env.as_deref(), Some("prod"));

        match original {
            Some(value) => std::env::set_var(APP_ENV, value),
            None => std::env::remove_var(APP_ENV),
        }
    }
}
