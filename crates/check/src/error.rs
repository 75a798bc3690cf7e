//! Typed failures for the production build checklist.

use std::path::PathBuf;
use thiserror::Error;

/// A failed deployment precondition.
///
/// The checker stops at the first failure, so a run surfaces at most one
/// of these. Every variant names the condition precisely enough that a
/// pipeline log alone tells the operator what to fix.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckError {
    /// The deployment mode variable is unset or not the production literal.
    #[error("APP_ENV must be set to prod (found {found:?})")]
    NotProductionMode {
        /// Value observed in the environment snapshot, if any.
        found: Option<String>,
    },

    /// The production environment file is missing.
    #[error("missing environment file {}", .path.display())]
    MissingEnvFile { path: PathBuf },

    /// A required environment file entry is missing or has the wrong value.
    #[error("missing or invalid {name} entry (expected \"{expected}\", found {found:?})")]
    EnvEntry {
        name: String,
        expected: String,
        found: Option<String>,
    },

    /// A required runtime directory does not exist.
    #[error("missing directory {}", .path.display())]
    MissingDirectory { path: PathBuf },

    /// A required runtime path exists but is not a directory.
    #[error("{} exists but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// A required runtime directory cannot be written to.
    #[error("directory {} is not writable", .path.display())]
    DirectoryNotWritable { path: PathBuf },

    /// The generated-class directory holds no generated sources.
    #[error("no generated class files (*.php) under {}", .path.display())]
    NoGeneratedClasses { path: PathBuf },

    /// The public asset directory is empty.
    #[error("no installed web assets under {}", .path.display())]
    NoInstalledAssets { path: PathBuf },

    /// The optimized autoloader was never dumped.
    #[error("missing {}; run `composer dump-autoload --optimize --classmap-authoritative`", .path.display())]
    MissingAutoloader { path: PathBuf },

    /// A development-only dependency is installed.
    #[error("dev dependency {name} must not be installed in a production build")]
    DevDependencyInstalled { name: String },

    /// The warmed production cache directory is missing.
    #[error("missing production cache directory {}", .path.display())]
    MissingProductionCache { path: PathBuf },
}
