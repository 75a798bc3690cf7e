//! Deployment lifecycle operations for Pimcore-style builds.
//!
//! This crate wires the `pimops` CLI together:
//! - [`config`]: one-shot snapshot of the deployment environment.
//! - [`console`]: sequential external command execution with captured
//!   results.
//! - [`fsops`]: directory bootstrap, template copies, and symlink-safe
//!   recursive deletion.
//! - [`hooks`]: the build, setup, and install sequences themselves.
//!
//! The `check` subcommand delegates to the `pimops-check` crate.

pub mod cli;
pub mod config;
pub mod console;
pub mod fsops;
pub mod hooks;

#[cfg(test)]
mod test_support;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::DeployEnv;
use crate::console::{CommandRunner, DryRunner, ProcessRunner};

/// CLI entry point: parses arguments, snapshots the environment once, and
/// dispatches to the selected component.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let env = DeployEnv::from_env();
    match cli.command {
        Commands::Check { root } => {
            let ctx = pimops_check::CheckContext::new(root, env.app_env.clone());
            pimops_check::verify_build(&ctx)
        }
        Commands::Build { root, dry_run } => {
            if !dry_run {
                hooks::bootstrap(&root)?;
            }
            with_runner(&root, dry_run, |runner| hooks::build(&env, runner))
        }
        Commands::Setup { root, dry_run } => {
            with_runner(&root, dry_run, |runner| hooks::setup(&env, runner))
        }
        Commands::Install { root, dry_run } => {
            with_runner(&root, dry_run, |runner| hooks::install(&env, runner))
        }
    }
}

/// Hands the sequence a real process runner, or the printing dry-run
/// runner when requested.
fn with_runner(
    root: &Path,
    dry_run: bool,
    sequence: impl FnOnce(&dyn CommandRunner) -> Result<()>,
) -> Result<()> {
    if dry_run {
        sequence(&DryRunner)
    } else {
        sequence(&ProcessRunner::new(root))
    }
}
