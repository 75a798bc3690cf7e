//! Production build preconditions for Pimcore-style deployments.
//!
//! The checklist mirrors what a pipeline gate needs to know before
//! promoting a build: the environment is locked to production, generated
//! classes and installed web assets are present, development dependencies
//! are absent, and every runtime directory is writable.
//!
//! Checks run in a fixed order and stop at the first failure; the
//! resulting [`CheckError`] names the exact condition that failed.
//!
//! # Example
//!
//! ```no_run
//! use pimops_check::{verify_build, CheckContext};
//!
//! let ctx = CheckContext::new(".", std::env::var("APP_ENV").ok());
//! if let Err(err) = verify_build(&ctx) {
//!     eprintln!("build is not production-ready: {err}");
//! }
//! ```

pub mod envfile;
pub mod error;
pub mod manifest;

pub use envfile::{load_env_file, parse_env_file};
pub use error::CheckError;
pub use manifest::DependencyManifest;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Runtime directories every deployment must provide, writable.
pub const REQUIRED_DIRS: &[&str] = &[
    "public/bundles",
    "public/var",
    "var/config",
    "var/classes",
    "var/log",
    "var/recyclebin",
    "var/versions",
];

/// Environment file entries a production build must pin.
const REQUIRED_ENV_ENTRIES: &[(&str, &str)] = &[
    ("PIMCORE_CLASS_DEFINITION_WRITABLE", "0"),
    ("APP_DEBUG", "0"),
];

/// Name of the production environment file.
pub const PROD_ENV_FILE: &str = ".env.prod";

/// The deployment-mode literal a production build must declare.
pub const PRODUCTION_ENV: &str = "prod";

/// Generated-class directory that a built deployment must populate.
pub const GENERATED_CLASS_DIR: &str = "var/classes/DataObject";

/// Inputs for a checker run: the deployment root and the environment
/// snapshot taken at startup.
#[derive(Debug, Clone)]
pub struct CheckContext {
    root: PathBuf,
    app_env: Option<String>,
}

impl CheckContext {
    pub fn new(root: impl Into<PathBuf>, app_env: Option<String>) -> Self {
        Self {
            root: root.into(),
            app_env,
        }
    }

    /// Deployment root all relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

/// Runs the full production checklist, stopping at the first failure.
///
/// Returns `Ok(())` when every precondition holds; the process should then
/// exit 0 with no output. I/O failures outside the checklist itself (an
/// unreadable manifest, a failed directory listing) surface as errors with
/// context rather than as checklist conditions.
pub fn verify_build(ctx: &CheckContext) -> Result<()> {
    check_production_mode(ctx)?;
    check_env_entries(ctx)?;
    check_required_dirs(ctx)?;
    check_generated_classes(ctx)?;
    check_installed_assets(ctx)?;
    check_autoloader(ctx)?;
    check_dev_dependencies(ctx)?;
    check_production_cache(ctx)?;
    tracing::debug!(root = %ctx.root.display(), "all deployment preconditions hold");
    Ok(())
}

/// The deployment mode must be pinned to production before anything on
/// disk is worth inspecting.
fn check_production_mode(ctx: &CheckContext) -> Result<(), CheckError> {
    if ctx.app_env.as_deref() == Some(PRODUCTION_ENV) {
        return Ok(());
    }
    Err(CheckError::NotProductionMode {
        found: ctx.app_env.clone(),
    })
}

/// The production environment file must exist and pin the required
/// entries to their expected values.
fn check_env_entries(ctx: &CheckContext) -> Result<()> {
    let path = ctx.path(PROD_ENV_FILE);
    if !path.exists() {
        return Err(CheckError::MissingEnvFile { path }.into());
    }
    let vars = envfile::load_env_file(&path)?;
    for (name, expected) in REQUIRED_ENV_ENTRIES {
        let found = vars.get(*name);
        if found.map(String::as_str) != Some(*expected) {
            return Err(CheckError::EnvEntry {
                name: (*name).to_string(),
                expected: (*expected).to_string(),
                found: found.cloned(),
            }
            .into());
        }
    }
    Ok(())
}

/// Every runtime directory must exist, be a directory, and accept writes.
///
/// Writability is proven with an anonymous probe file rather than by
/// reading permission bits, so ACLs and ownership are accounted for.
fn check_required_dirs(ctx: &CheckContext) -> Result<(), CheckError> {
    for rel in REQUIRED_DIRS {
        let path = ctx.path(rel);
        if !path.exists() {
            return Err(CheckError::MissingDirectory { path });
        }
        if !path.is_dir() {
            return Err(CheckError::NotADirectory { path });
        }
        if tempfile::tempfile_in(&path).is_err() {
            return Err(CheckError::DirectoryNotWritable { path });
        }
    }
    Ok(())
}

/// The class-building step must have left at least one generated source
/// file behind.
fn check_generated_classes(ctx: &CheckContext) -> Result<()> {
    let path = ctx.path(GENERATED_CLASS_DIR);
    if !path.is_dir() {
        return Err(CheckError::NoGeneratedClasses { path }.into());
    }
    let entries = fs::read_dir(&path)
        .with_context(|| format!("failed to list {}", path.display()))?;
    let has_generated = entries.filter_map(|entry| entry.ok()).any(|entry| {
        entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && entry.file_name().to_string_lossy().ends_with(".php")
    });
    if !has_generated {
        return Err(CheckError::NoGeneratedClasses { path }.into());
    }
    Ok(())
}

/// The asset-install step must have populated the public bundle directory.
fn check_installed_assets(ctx: &CheckContext) -> Result<()> {
    let path = ctx.path("public/bundles");
    let mut entries = fs::read_dir(&path)
        .with_context(|| format!("failed to list {}", path.display()))?;
    if entries.next().is_none() {
        return Err(CheckError::NoInstalledAssets { path }.into());
    }
    Ok(())
}

/// The dependency manager must have dumped its optimized loader.
fn check_autoloader(ctx: &CheckContext) -> Result<(), CheckError> {
    let path = ctx.path("vendor/autoload.php");
    if !path.exists() {
        return Err(CheckError::MissingAutoloader { path });
    }
    Ok(())
}

/// No package declared as development-only may be present in the
/// installed dependency tree.
fn check_dev_dependencies(ctx: &CheckContext) -> Result<()> {
    let manifest = DependencyManifest::load(&ctx.path("composer.json"))?;
    let vendor = ctx.path("vendor");
    for name in manifest.dev_dependencies() {
        if vendor.join(name).exists() {
            return Err(CheckError::DevDependencyInstalled {
                name: name.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// The production cache must have been warmed.
fn check_production_cache(ctx: &CheckContext) -> Result<(), CheckError> {
    let path = ctx.path("var/cache/prod");
    if !path.exists() {
        return Err(CheckError::MissingProductionCache { path });
    }
    Ok(())
}
