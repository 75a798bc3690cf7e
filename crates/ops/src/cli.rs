use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the `pimops` application.
#[derive(Debug, Parser)]
#[command(
    name = "pimops",
    about = "Deployment support tooling for Pimcore-style builds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `pimops` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verifies that the working tree is a production-ready build.
    ///
    /// Exits 0 silently when every precondition holds; otherwise prints
    /// the first failed condition and exits nonzero.
    Check {
        /// Deployment root to inspect.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
    },
    /// Post-build hook: bootstraps config files and runtime directories,
    /// purges stale generated classes, then rebuilds classes, installs
    /// web assets, and clears caches.
    Build {
        /// Deployment root to operate on.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
        /// Only print the commands that would run, without executing
        /// anything or touching the filesystem.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Post-setup hook: rebuilds deployment classes, installs optional
    /// bundles, runs database migrations, and refreshes the application
    /// cache.
    Setup {
        /// Deployment root to operate on.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
        /// Only print the commands that would run, without executing them.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Runs the application installer non-interactively.
    Install {
        /// Deployment root to operate on.
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
        /// Only print the command that would run, without executing it.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}
