//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `neko-adapters` crate provides implementations.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{ProjectConfig, RemoteRelease, RepoInfo};
use crate::error::NekoResult;

// ── Commands ──────────────────────────────────────────────────────────────────

/// A program invocation handed to a [`CommandRunner`].
///
/// Environment values are never rendered by `Display`; they usually carry
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// `true` if this is `program` invoked with exactly `args`.
    pub fn is(&self, program: &str, args: &[&str]) -> bool {
        self.program == program && self.args.iter().map(String::as_str).eq(args.iter().copied())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, _) in &self.env {
            write!(f, "{key}=***** ")?;
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Combined stdout and stderr.
    pub output: String,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: output.into(),
        }
    }

    pub fn trimmed(&self) -> &str {
        self.output.trim()
    }
}

/// Port for running external programs (git and the release backends).
///
/// Implemented by:
/// - `neko_adapters::process::SystemCommandRunner` (production)
/// - `neko_adapters::process::ScriptedRunner` (testing)
///
/// `run` fails only when the program could not be started; a non-zero exit
/// is reported through [`CommandOutput::success`].
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> NekoResult<CommandOutput>;

    /// Resolve a program on `PATH`.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Port for the project configuration record.
///
/// Implemented by:
/// - `neko_adapters::config_store::JsonConfigStore` (`.neko.json`)
/// - `neko_adapters::config_store::MemoryConfigStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    /// Fails with `ConfigNotFound` or `ConfigParseError`.
    fn load(&self) -> NekoResult<ProjectConfig>;

    /// Fails with `ConfigWriteError`.
    fn save(&self, config: &ProjectConfig) -> NekoResult<()>;

    fn exists(&self) -> bool;

    /// Where the record lives, for messages.
    fn location(&self) -> PathBuf;
}

// ── Interaction ───────────────────────────────────────────────────────────────

/// Port for interactive prompts.
///
/// Implemented by:
/// - `neko_cli::survey::TerminalSurvey` (dialoguer)
/// - `neko_adapters::survey::ScriptedSurvey` (testing)
///
/// Every method fails with `SurveyCancelled` when the operator aborts.
#[cfg_attr(test, mockall::automock)]
pub trait Survey: Send + Sync {
    /// Returns the index of the chosen option.
    fn select(&self, prompt: &str, options: &[String], default: usize) -> NekoResult<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> NekoResult<bool>;

    fn input(&self, prompt: &str, default: &str) -> NekoResult<String>;
}

// ── Remote ────────────────────────────────────────────────────────────────────

/// Port for the hosting service's release API.
///
/// Implemented by:
/// - `neko_adapters::github::GithubClient`
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseApi: Send + Sync {
    /// `Ok(None)` when the repository has no releases yet.
    fn latest_release(&self, repo: &RepoInfo) -> NekoResult<Option<RemoteRelease>>;
}
