//! Command-line interface for the `pimops` application.
//!
//! This crate serves as the main entry point for the executable,
//! delegating its functionality to the `pimops-ops` crate.

fn main() -> anyhow::Result<()> {
    pimops_ops::run()
}
