//! Unified error handling for Neko Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with stable codes and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Neko Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NekoError {
    /// Errors from the domain layer (release rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl NekoError {
    /// Stable `NEKO_xxxx` code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Application(e) => e.code(),
            Self::Configuration { .. } => "NEKO_3006",
            Self::Internal { .. } => "NEKO_9000",
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check neko.toml and NEKO_* environment variables".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Neko".into(),
                "Please report this issue at: https://github.com/neko-cli/neko/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Version => ErrorCategory::Version,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The application error, if this is one.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self {
            Self::Application(e) => Some(e),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Version,
    Repository,
    Configuration,
    Tooling,
    Remote,
    Internal,
}

/// Convenient result type alias.
pub type NekoResult<T> = Result<T, NekoError>;
