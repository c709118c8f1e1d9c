//! External command execution for project builds.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

/// A program and its arguments, e.g. `npm run build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build a command from an argv-style list. Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a finished command exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,

    /// Exit code, if the process exited normally
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }
}

/// Capability to run an external command to completion.
///
/// The builder only talks to processes through this trait, so tests can
/// swap in a runner that fakes build output.
pub trait CommandRunner {
    /// Run `command` with `cwd` as working directory and wait for it to exit.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> io::Result<CommandStatus>;
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> io::Result<CommandStatus> {
        tracing::info!("Running `{}` in {}", command, cwd.display());

        // Package managers ship as .cmd shims on Windows, which only resolve through the shell.
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&command.program);
            cmd
        } else {
            Command::new(&command.program)
        };

        let status = cmd.args(&command.args).current_dir(cwd).status()?;

        Ok(CommandStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}
