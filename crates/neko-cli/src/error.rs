//! Error handling for the Neko CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages carrying the stable `NEKO_xxxx` code
//! - Actionable suggestions
//! - Proper error chaining

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use neko_core::error::{ErrorCategory as CoreCategory, NekoError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `neko-core` or an adapter.
    #[error("{0}")]
    Core(#[from] NekoError),

    /// Tool settings could not be read or were invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The project directory is unusable.
    #[error("Project directory '{path}' is not accessible")]
    ProjectDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::ConfigError {
            message: format!("{err:#}"),
            source: None,
        }
    }
}

impl CliError {
    /// Stable code shown next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(e) => e.code(),
            Self::ConfigError { .. } => "NEKO_3006",
            Self::ProjectDir { .. } | Self::IoError { .. } => "NEKO_2003",
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core_err) => core_err.suggestions(),

            Self::ConfigError { message, .. } => vec![
                format!("Settings issue: {message}"),
                "Check neko.toml in the project directory (or the file given with --config)"
                    .into(),
                "NEKO_<SECTION>__<KEY> environment variables override the file".into(),
            ],

            Self::ProjectDir { path, .. } => vec![
                format!("Check that '{}' exists and is readable", path.display()),
                "Pass the repository root with -C/--project-dir".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Version => ErrorCategory::UserError,
                CoreCategory::Repository => ErrorCategory::Repository,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Tooling | CoreCategory::Remote => ErrorCategory::External,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::ProjectDir { .. } => ErrorCategory::UserError,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.  Every fatal error exits with `1`.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {} {}\n\n",
            "✗".red().bold(),
            "Error".red().bold(),
            format!("[{}]", self.code()).dimmed()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError [{}]: {}\n", self.code(), self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        let code = self.code();
        match self.category() {
            ErrorCategory::UserError => tracing::warn!(code, "User error: {}", self),
            ErrorCategory::Repository => tracing::warn!(code, "Repository not ready: {}", self),
            ErrorCategory::Configuration => tracing::error!(code, "Configuration error: {}", self),
            ErrorCategory::External => tracing::error!(code, "External failure: {}", self),
            ErrorCategory::Internal => tracing::error!(code, "Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid input or a release rule violation.
    UserError,
    /// The repository is not in a releasable state.
    Repository,
    Configuration,
    /// A release backend, git or the GitHub API failed.
    External,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use neko_core::application::ApplicationError;
    use std::io;

    fn dirty_tree() -> CliError {
        CliError::Core(ApplicationError::DirtyWorkingTree.into())
    }

    // ── codes & suggestions ───────────────────────────────────────────────

    #[test]
    fn core_errors_keep_their_code() {
        assert_eq!(dirty_tree().code(), "NEKO_1004");
        assert_eq!(dirty_tree().category(), ErrorCategory::Repository);
    }

    #[test]
    fn core_suggestions_are_forwarded() {
        assert_eq!(
            dirty_tree().suggestions(),
            NekoError::from(ApplicationError::DirtyWorkingTree).suggestions()
        );
    }

    #[test]
    fn config_error_points_at_settings_file() {
        let err = CliError::ConfigError {
            message: "bad".into(),
            source: None,
        };
        assert!(err.suggestions().iter().any(|s| s.contains("neko.toml")));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn anyhow_errors_become_config_errors() {
        let err: CliError = anyhow::anyhow!("invalid type: string \"x\"").into();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn every_error_exits_with_one() {
        assert_eq!(dirty_tree().exit_code(), 1);
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_code_and_suggestions() {
        let s = dirty_tree().format_plain(false);
        assert!(s.contains("Error [NEKO_1004]:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::ProjectDir {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: missing"));
        assert!(!s.contains("--verbose"));
    }
}
