//! External tool wrappers
//!
//! Provides:
//! - Environment-sanitized pass-through of a single tool invocation
//! - Per-package static analysis across a packages directory

mod packages;

pub use packages::*;

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::process::Command;

/// A child process invocation with selected variables removed from its environment
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    strip_env: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            strip_env: Vec::new(),
        }
    }

    /// Build from a configured command line such as `["dart", "format"]`
    pub fn from_command_line(command_line: &[String]) -> Result<Self> {
        let (program, args) = command_line
            .split_first()
            .context("Tool command line is empty")?;
        Ok(Self::new(program.as_str()).args(args))
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env_remove_all<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_env.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The `std::process::Command` this tool would run, stdio inherited
    pub fn build(&self) -> Command {
        let mut cmd = platform_command(&self.program);
        self.apply(&mut cmd);
        cmd
    }

    /// Append the arguments and environment removals to `cmd`
    fn apply(&self, cmd: &mut Command) {
        cmd.args(&self.args);
        for key in &self.strip_env {
            cmd.env_remove(key);
        }
    }

    /// Run to completion and return the child's exit code
    pub fn status(&self) -> Result<i32> {
        let status = self
            .build()
            .status()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        // Terminated by a signal: no code to forward
        Ok(status.code().unwrap_or(1))
    }
}

// `.bat` launchers (dart.bat, flutter.bat) only resolve through cmd.exe
#[cfg(windows)]
fn platform_command(program: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", program]);
    cmd
}

#[cfg(not(windows))]
fn platform_command(program: &str) -> Command {
    Command::new(program)
}
