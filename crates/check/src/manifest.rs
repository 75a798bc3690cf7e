//! Dependency manifest (`composer.json`) access.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// The slice of the dependency manifest the checker cares about: the set
/// of packages declared as development-only.
#[derive(Debug, Default, Deserialize)]
pub struct DependencyManifest {
    /// Packages required only for development and testing. Values are the
    /// version constraints, which the checker never interprets.
    #[serde(default, rename = "require-dev")]
    require_dev: BTreeMap<String, serde_json::Value>,
}

impl DependencyManifest {
    /// Loads the manifest from disk.
    ///
    /// A manifest without a `require-dev` table parses to an empty
    /// dependency list; an unreadable or malformed manifest is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dependency manifest {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("malformed dependency manifest {}", path.display()))
    }

    /// Names of declared development-only dependencies, in manifest key
    /// order.
    pub fn dev_dependencies(&self) -> impl Iterator<Item = &str> {
        self.require_dev.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_dependencies_come_from_require_dev() {
        let manifest: DependencyManifest = serde_json::from_str(
            r#"{
                "require": {"vendor/runtime": "^2.0"},
                "require-dev": {"phpunit/phpunit": "^10", "foo/bar": "*"}
            }"#,
        )
        .unwrap();
        let deps: Vec<&str> = manifest.dev_dependencies().collect();
        assert_eq!(deps, vec!["foo/bar", "phpunit/phpunit"]);
    }

    #[test]
    fn manifest_without_require_dev_is_empty() {
        let manifest: DependencyManifest =
            serde_json::from_str(r#"{"name": "acme/site"}"#).unwrap();
        assert_eq!(manifest.dev_dependencies().count(), 0);
    }

    #[test]
    fn load_reports_malformed_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("composer.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = DependencyManifest::load(&path).unwrap_err();
        assert!(
            err.to_string().contains("malformed dependency manifest"),
            "unexpected error: {err}"
        );
    }
}
