//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! behind the ports, not release rules. Rule violations are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during release orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    // ── Environment ───────────────────────────────────────────────────────
    #[error("environment variable {var} is not set")]
    MissingToken { var: String },

    // ── Repository ────────────────────────────────────────────────────────
    #[error("not a git repository: {reason}")]
    NoGitRepo { reason: String },

    #[error("the repository has no remote configured")]
    NoRemote,

    #[error("could not derive a GitHub owner/repository from the remotes: {remotes}")]
    InvalidRemoteUrl { remotes: String },

    #[error("the working tree has uncommitted changes")]
    DirtyWorkingTree,

    #[error("you are on branch '{branch}'; releases are only allowed from 'main' or 'master'")]
    WrongBranch { branch: String },

    #[error("HEAD is detached")]
    DetachedHead,

    #[error("branch '{branch}' has no upstream")]
    NoUpstream { branch: String },

    #[error("branch '{branch}' is behind its upstream")]
    BranchBehind { branch: String },

    #[error("git is not usable here: {reason}")]
    GitUnavailable { reason: String },

    // ── Remote API ────────────────────────────────────────────────────────
    #[error("request to {url} failed: {reason}")]
    ApiRequest { url: String, reason: String },

    #[error("unexpected response from {url}: HTTP {status}")]
    ApiResponse { url: String, status: u16 },

    #[error("cannot access {path}: {reason}")]
    FileAccess { path: PathBuf, reason: String },

    // ── Configuration I/O ─────────────────────────────────────────────────
    #[error("configuration already exists at {path}")]
    ConfigExists { path: PathBuf },

    #[error("no configuration found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("prompt cancelled")]
    SurveyCancelled,

    #[error("prompt returned choice {index} but only {options} options were offered")]
    InvalidSelection { index: usize, options: usize },

    #[error("failed to parse {path}: {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    ConfigWriteError { path: PathBuf, reason: String },

    // ── Tool resolution / execution ───────────────────────────────────────
    #[error("unknown release system '{name}'")]
    UnknownReleaseSystem { name: String, available: Vec<String> },

    #[error("{tool} cannot choose a release type interactively")]
    InteractiveModeUnsupported { tool: String },

    #[error("{tool} release failed at step '{step}'")]
    ReleaseFailed {
        tool: String,
        step: String,
        output: String,
    },

    #[error("failed to initialise {tool}: {reason}")]
    ReleaseSystemInitFailed { tool: String, reason: String },

    #[error("required program '{binary}' was not found on PATH")]
    DependencyMissing { binary: String },

    #[error("failed to run '{program}': {reason}")]
    CommandSpawn { program: String, reason: String },
}

impl ApplicationError {
    /// Stable error code shown next to the message.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "NEKO_1000",
            Self::NoGitRepo { .. } => "NEKO_1001",
            Self::NoRemote => "NEKO_1002",
            Self::InvalidRemoteUrl { .. } => "NEKO_1003",
            Self::DirtyWorkingTree => "NEKO_1004",
            Self::WrongBranch { .. } => "NEKO_1005",
            Self::DetachedHead => "NEKO_1006",
            Self::NoUpstream { .. } => "NEKO_1007",
            Self::BranchBehind { .. } => "NEKO_1008",
            Self::GitUnavailable { .. } => "NEKO_1009",
            Self::ApiRequest { .. } => "NEKO_2000",
            Self::ApiResponse { .. } => "NEKO_2001",
            Self::FileAccess { .. } => "NEKO_2003",
            Self::ConfigExists { .. } => "NEKO_3000",
            Self::ConfigNotFound { .. } => "NEKO_3001",
            Self::SurveyCancelled => "NEKO_3002",
            Self::InvalidSelection { .. } => "NEKO_3003",
            Self::ConfigParseError { .. } => "NEKO_3004",
            Self::ConfigWriteError { .. } => "NEKO_3005",
            Self::UnknownReleaseSystem { .. } => "NEKO_4001",
            Self::ReleaseFailed { .. } => "NEKO_4002",
            Self::InteractiveModeUnsupported { .. } => "NEKO_4003",
            Self::CommandSpawn { .. } => "NEKO_4006",
            Self::DependencyMissing { .. } => "NEKO_4007",
            Self::ReleaseSystemInitFailed { .. } => "NEKO_4008",
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingToken { var } => vec![
                format!("Export a GitHub personal access token as {}", var),
                "Or put it in a .env file next to .neko.json".into(),
            ],
            Self::NoGitRepo { .. } => vec![
                "Run neko from inside a git checkout".into(),
                "Or pass the repository root with -C <DIR>".into(),
            ],
            Self::NoRemote => vec!["Add one: git remote add origin git@github.com:<owner>/<repo>.git".into()],
            Self::InvalidRemoteUrl { .. } => vec![
                "Only GitHub remotes are supported".into(),
                "Expected git@github.com:<owner>/<repo>.git or https://github.com/<owner>/<repo>".into(),
            ],
            Self::DirtyWorkingTree => vec!["Commit or stash your changes first".into()],
            Self::WrongBranch { .. } => vec!["Switch branches: git checkout main".into()],
            Self::DetachedHead => vec!["Check out a branch: git checkout main".into()],
            Self::NoUpstream { branch } => {
                vec![format!("Set one: git push -u origin {}", branch)]
            }
            Self::BranchBehind { .. } => vec!["Pull the latest changes: git pull --rebase".into()],
            Self::GitUnavailable { .. } => vec!["Ensure git is installed and on your PATH".into()],
            Self::ApiRequest { .. } => vec![
                "Check your network connection".into(),
                "Check that GITHUB_TOKEN is valid".into(),
            ],
            Self::ApiResponse { status, .. } if *status == 401 || *status == 403 => {
                vec!["The token was rejected; check its scopes and expiry".into()]
            }
            Self::ConfigExists { .. } => vec!["Use 'neko init --force' to overwrite it".into()],
            Self::ConfigNotFound { .. } => vec!["Create one with: neko init".into()],
            Self::ConfigParseError { .. } => vec![
                "Check that .neko.json is valid JSON".into(),
                "Run 'neko init --force' to regenerate it".into(),
            ],
            Self::ConfigWriteError { .. } | Self::FileAccess { .. } => {
                vec!["Check file permissions in the project directory".into()]
            }
            Self::UnknownReleaseSystem { available, .. } => vec![
                format!("Available release systems: {}", available.join(", ")),
                "Fix \"releaseSystem\" in .neko.json".into(),
            ],
            Self::InteractiveModeUnsupported { tool } => {
                vec![format!("{} needs an explicit type: neko release <major|minor|patch>", tool)]
            }
            Self::ReleaseFailed { output, .. } if !output.trim().is_empty() => {
                vec![format!("Command output:\n{}", output.trim_end())]
            }
            Self::DependencyMissing { binary } => {
                vec![format!("Install '{}' and make sure it is on your PATH", binary)]
            }
            Self::CommandSpawn { program, .. } => {
                vec![format!("Ensure '{}' is installed and executable", program)]
            }
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Whether this error is one of the preflight gate failures.
    pub const fn is_preflight_gate(&self) -> bool {
        matches!(
            self,
            Self::DirtyWorkingTree
                | Self::DetachedHead
                | Self::WrongBranch { .. }
                | Self::NoUpstream { .. }
                | Self::BranchBehind { .. }
        )
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingToken { .. } => ErrorCategory::Configuration,
            Self::NoGitRepo { .. }
            | Self::NoRemote
            | Self::InvalidRemoteUrl { .. }
            | Self::DirtyWorkingTree
            | Self::WrongBranch { .. }
            | Self::DetachedHead
            | Self::NoUpstream { .. }
            | Self::BranchBehind { .. }
            | Self::GitUnavailable { .. } => ErrorCategory::Repository,
            Self::ApiRequest { .. } | Self::ApiResponse { .. } => ErrorCategory::Remote,
            Self::FileAccess { .. } => ErrorCategory::Internal,
            Self::ConfigExists { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigWriteError { .. } => ErrorCategory::Configuration,
            Self::SurveyCancelled => ErrorCategory::Validation,
            Self::InvalidSelection { .. } => ErrorCategory::Internal,
            Self::UnknownReleaseSystem { .. }
            | Self::InteractiveModeUnsupported { .. }
            | Self::ReleaseFailed { .. }
            | Self::ReleaseSystemInitFailed { .. }
            | Self::DependencyMissing { .. }
            | Self::CommandSpawn { .. } => ErrorCategory::Tooling,
        }
    }
}
