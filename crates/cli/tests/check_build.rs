//! CLI integration tests for `pimops check`.
//!
//! Each test prepares a deployment root in a sandbox and drives the real
//! binary, verifying the exit status and the failure message end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::{Context, Result};
use pimops_check::{GENERATED_CLASS_DIR, PROD_ENV_FILE, REQUIRED_DIRS};

/// Populates `root` so that every deployment precondition holds.
fn scaffold_production_root(root: &Path) -> Result<()> {
    fs::write(
        root.join(PROD_ENV_FILE),
        "PIMCORE_CLASS_DEFINITION_WRITABLE=0\nAPP_DEBUG=0\n",
    )?;
    for dir in REQUIRED_DIRS {
        fs::create_dir_all(root.join(dir))?;
    }
    fs::create_dir_all(root.join(GENERATED_CLASS_DIR))?;
    fs::write(root.join(GENERATED_CLASS_DIR).join("Product.php"), "<?php")?;
    fs::create_dir_all(root.join("public/bundles/admin"))?;
    fs::create_dir_all(root.join("vendor"))?;
    fs::write(root.join("vendor/autoload.php"), "<?php")?;
    fs::write(
        root.join("composer.json"),
        r#"{"require-dev": {"phpunit/phpunit": "^10"}}"#,
    )?;
    fs::create_dir_all(root.join("var/cache/prod"))?;
    Ok(())
}

/// Runs `pimops check --root <root>` with a controlled environment.
fn run_check(root: &Path, app_env: Option<&str>) -> Result<Output> {
    let bin_path = env!("CARGO_BIN_EXE_pimops");
    let mut cmd = Command::new(bin_path);
    cmd.args(["check", "--root"])
        .arg(root)
        .env_remove("APP_ENV")
        .env_remove("RUST_LOG");
    if let Some(value) = app_env {
        cmd.env("APP_ENV", value);
    }
    cmd.output().context("failed to execute pimops check")
}

#[test]
fn given_prepared_root_when_check_runs_then_it_passes_silently() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    scaffold_production_root(tmp.path())?;

    let output = run_check(tmp.path(), Some("prod"))?;

    assert!(
        output.status.success(),
        "check should pass\nSTDOUT:\n{}\nSTDERR:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        output.stdout.is_empty(),
        "a passing check prints nothing: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    Ok(())
}

#[test]
fn given_installed_dev_dependency_when_check_runs_then_it_fails_naming_it() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    scaffold_production_root(tmp.path())?;
    // The manifest already declares phpunit/phpunit as dev-only; installing
    // it must fail the gate.
    fs::create_dir_all(tmp.path().join("vendor/phpunit/phpunit"))?;

    let output = run_check(tmp.path(), Some("prod"))?;

    assert!(!output.status.success(), "check should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("phpunit/phpunit"),
        "failure should name the offending package: {stderr}"
    );
    Ok(())
}

#[test]
fn given_no_app_env_when_check_runs_then_it_fails_before_reading_the_root() -> Result<()> {
    // The root does not exist at all; only the environment check can fire.
    let output = run_check(Path::new("/nonexistent/pimops/root"), None)?;

    assert!(!output.status.success(), "check should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("APP_ENV must be set to prod"),
        "failure should name the deployment mode: {stderr}"
    );
    Ok(())
}

#[test]
fn given_missing_directory_when_check_runs_then_it_names_that_path() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    scaffold_production_root(tmp.path())?;
    fs::remove_dir(tmp.path().join("var/recyclebin"))?;

    let output = run_check(tmp.path(), Some("prod"))?;

    assert!(!output.status.success(), "check should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("var/recyclebin"),
        "failure should name the missing directory: {stderr}"
    );
    Ok(())
}
