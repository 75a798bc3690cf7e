//! Sequential external command execution.
//!
//! The hooks drive the application's own command-line tool (`php
//! bin/console …`) and its installer binary. Historically those calls were
//! fire-and-forget; here every invocation returns a captured
//! [`StepOutput`], and callers decide whether a nonzero exit halts the
//! sequence.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::config;

/// Interpreter and entry script used for application subcommands.
const PHP_BINARY: &str = "php";
const CONSOLE_SCRIPT: &str = "bin/console";
/// Installer binary for the standalone install routine.
const INSTALLER_BINARY: &str = "pimcore-install";

/// Errors surfaced by external command execution.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The subprocess could not be spawned at all.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The subprocess ran but exited nonzero (or was killed by a signal).
    #[error("step '{step}' exited with code {code:?}: {stderr}")]
    Failed {
        step: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// A single external command: program, arguments, and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// An application console subcommand (`php bin/console …`).
    pub fn console<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut full = vec![CONSOLE_SCRIPT.to_string()];
        full.extend(args.into_iter().map(Into::into));
        Self {
            program: PHP_BINARY.to_string(),
            args: full,
            env: Vec::new(),
        }
    }

    /// The standalone installer with its configuration directory pinned.
    pub fn installer(configuration_directory: &str) -> Self {
        Self {
            program: INSTALLER_BINARY.to_string(),
            args: vec![
                "--ignore-existing-config".to_string(),
                "--skip-database-config".to_string(),
                "--no-interaction".to_string(),
            ],
            env: vec![(
                config::CONFIGURATION_DIRECTORY.to_string(),
                configuration_directory.to_string(),
            )],
        }
    }

    /// Short label used in logs and failure messages: the console
    /// subcommand name where there is one, the program name otherwise.
    pub fn label(&self) -> String {
        if self.program == PHP_BINARY
            && self.args.first().map(String::as_str) == Some(CONSOLE_SCRIPT)
        {
            self.args
                .get(1)
                .cloned()
                .unwrap_or_else(|| CONSOLE_SCRIPT.to_string())
        } else {
            self.program.clone()
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={value} ")?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit code and captured output of one completed step.
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// Exit code, `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes invocations one at a time, blocking until each child exits.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<StepOutput, ConsoleError>;
}

/// Spawns real subprocesses with the deployment root as working directory.
#[derive(Debug)]
pub struct ProcessRunner {
    root: PathBuf,
}

impl ProcessRunner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<StepOutput, ConsoleError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(&self.root);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        tracing::debug!(command = %invocation, "spawning");
        let output = cmd.output().map_err(|source| ConsoleError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;
        Ok(StepOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Prints each invocation without spawning anything.
///
/// Backs the `--dry-run` flags: sequences run to completion and report
/// every command they would have issued.
#[derive(Debug, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&self, invocation: &Invocation) -> Result<StepOutput, ConsoleError> {
        println!("would run: {invocation}");
        Ok(StepOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Runs an invocation and halts on a nonzero exit.
pub fn run_required(
    runner: &dyn CommandRunner,
    invocation: &Invocation,
) -> Result<StepOutput, ConsoleError> {
    let step = invocation.label();
    tracing::info!(step = %step, "running");
    let output = runner.run(invocation)?;
    if !output.success() {
        return Err(ConsoleError::Failed {
            step,
            code: output.code,
            stderr: output.stderr,
        });
    }
    Ok(output)
}
