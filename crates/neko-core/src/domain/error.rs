// ============================================================================
// domain/error.rs - RELEASE RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside reports and outcomes)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Version rules
    // ========================================================================
    #[error("version '{version}' violates release rules: {reason}")]
    VersionViolation { version: String, reason: String },

    #[error("'{input}' is not a valid semantic version: {reason}")]
    InvalidVersion { input: String, reason: String },

    // ========================================================================
    // Parsing
    // ========================================================================
    #[error("invalid release type '{input}' (expected major, minor or patch)")]
    InvalidReleaseType { input: String },

    #[error("invalid project type '{input}' (expected frontend, backend or other)")]
    InvalidProjectType { input: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("invalid configuration field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl DomainError {
    /// Stable error code shown next to the message.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } | Self::InvalidProjectType { .. } => "NEKO_3006",
            Self::VersionViolation { .. } | Self::InvalidVersion { .. } => "NEKO_3007",
            Self::InvalidReleaseType { .. } => "NEKO_4000",
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::VersionViolation { version, .. } => vec![
                format!("The version in .neko.json is '{}'", version),
                "It must be a valid semantic version that is not lower than the latest tag".into(),
                "Fix the \"version\" field or create the missing tag".into(),
            ],
            Self::InvalidVersion { .. } => vec![
                "Use the form MAJOR.MINOR.PATCH, e.g. 0.1.0 or 1.4.2-rc.1".into(),
            ],
            Self::InvalidReleaseType { .. } => vec![
                "Valid release types: major, minor, patch".into(),
                "Example: neko release minor".into(),
                "Omit the type to choose interactively".into(),
            ],
            Self::InvalidProjectType { .. } => {
                vec!["Valid project types: frontend, backend, other".into()]
            }
            Self::InvalidConfig { field, .. } => vec![
                format!("Check the '{}' entry in .neko.json", field),
                "Run 'neko init --force' to regenerate the configuration".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::VersionViolation { .. } => ErrorCategory::Version,
            Self::InvalidVersion { .. }
            | Self::InvalidReleaseType { .. }
            | Self::InvalidProjectType { .. } => ErrorCategory::Validation,
            Self::InvalidConfig { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Version,
    Configuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_groups() {
        let err = DomainError::InvalidReleaseType {
            input: "huge".into(),
        };
        assert_eq!(err.code(), "NEKO_4000");

        let err = DomainError::VersionViolation {
            version: "1.0.0".into(),
            reason: "lower than tag".into(),
        };
        assert_eq!(err.code(), "NEKO_3007");
        assert_eq!(err.category(), ErrorCategory::Version);
    }

    #[test]
    fn release_type_suggestions_list_options() {
        let err = DomainError::InvalidReleaseType {
            input: "x".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("major")));
    }
}
