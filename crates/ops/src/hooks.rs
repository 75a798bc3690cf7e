//! Build, setup, and install lifecycle sequences.
//!
//! Ordering mirrors the deployment pipeline: [`bootstrap`] and [`build`]
//! run at package build time, [`setup`] at provisioning time, and
//! [`install`] once when the application is first installed. Every
//! external step halts the sequence on failure, except the per-bundle
//! install loop, which tolerates a failing bundle and moves on.

use std::path::Path;

use anyhow::{Context, Result};

use pimops_check::{GENERATED_CLASS_DIR, REQUIRED_DIRS};

use crate::config::DeployEnv;
use crate::console::{run_required, CommandRunner, Invocation};
use crate::fsops;

/// File bootstrap and cleanup preceding the build commands.
///
/// Copies `.env` and `config/parameters.yaml` from their templates when
/// absent, creates the runtime directories, and purges stale generated
/// classes. Safe to run repeatedly.
pub fn bootstrap(root: &Path) -> Result<()> {
    if fsops::copy_if_missing(&root.join(".env.dist"), &root.join(".env"))? {
        tracing::info!("bootstrapped .env from .env.dist");
    }
    if fsops::copy_if_missing(
        &root.join("config/parameters.example.yaml"),
        &root.join("config/parameters.yaml"),
    )? {
        tracing::info!("bootstrapped config/parameters.yaml from its example");
    }
    fsops::ensure_dirs(root, REQUIRED_DIRS)?;

    let generated = root.join(GENERATED_CLASS_DIR);
    if generated.exists() {
        fsops::remove_tree(&generated)
            .with_context(|| format!("failed to purge {}", generated.display()))?;
        tracing::info!(dir = %generated.display(), "purged stale generated classes");
    }
    Ok(())
}

/// Post-build command sequence: regenerate classes, install web assets,
/// clear caches.
///
/// Asset installation uses relative symlinks outside production so local
/// checkouts track bundle sources without re-installing.
pub fn build(env: &DeployEnv, runner: &dyn CommandRunner) -> Result<()> {
    run_required(runner, &Invocation::console(["pimcore:build:classes"]))?;

    let mut assets: Vec<&str> = vec!["assets:install"];
    if !env.is_production() {
        assets.extend_from_slice(&["--symlink", "--relative"]);
    }
    run_required(runner, &Invocation::console(assets))?;

    run_required(runner, &Invocation::console(["cache:clear"]))?;
    Ok(())
}

/// Post-setup sequence: rebuild deployment classes, install optional
/// bundles, then synchronize and run database migrations and refresh the
/// application cache.
pub fn setup(env: &DeployEnv, runner: &dyn CommandRunner) -> Result<()> {
    run_required(
        runner,
        &Invocation::console([
            "pimcore:deployment:classes-rebuild",
            "--delete-classes",
            "--create-classes",
            "--no-interaction",
        ]),
    )?;

    install_bundles(env, runner);

    run_required(
        runner,
        &Invocation::console(["doctrine:migrations:sync-metadata-storage"]),
    )?;
    run_required(
        runner,
        &Invocation::console(["doctrine:migrations:migrate", "--no-interaction"]),
    )?;
    run_required(
        runner,
        &Invocation::console(["pimcore:cache:clear", "--no-interaction"]),
    )?;
    run_required(
        runner,
        &Invocation::console(["pimcore:cache:warming", "--no-interaction"]),
    )?;
    Ok(())
}

/// Installs each configured optional bundle, tolerating per-bundle failure.
///
/// A bundle that fails to install is logged and skipped; the remaining
/// bundles and the rest of the setup sequence still run.
fn install_bundles(env: &DeployEnv, runner: &dyn CommandRunner) {
    for bundle in env.bundles() {
        let invocation = Invocation::console([
            "pimcore:bundle:install",
            "--fail-without-error",
            "--no-interaction",
            bundle.as_str(),
        ]);
        match runner.run(&invocation) {
            Ok(output) if output.success() => {
                tracing::info!(bundle = %bundle, "installed bundle");
            }
            Ok(output) => {
                tracing::warn!(
                    bundle = %bundle,
                    code = ?output.code,
                    stderr = %output.stderr,
                    "bundle install failed; continuing"
                );
            }
            Err(err) => {
                tracing::warn!(bundle = %bundle, error = %err, "bundle install could not run; continuing");
            }
        }
    }
}

/// Runs the application installer non-interactively, pointing it at the
/// configured configuration directory.
pub fn install(env: &DeployEnv, runner: &dyn CommandRunner) -> Result<()> {
    run_required(runner, &Invocation::installer(env.configuration_directory()))?;
    Ok(())
}
