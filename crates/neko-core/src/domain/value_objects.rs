//! Domain value objects: ReleaseType, ProjectType.
//!
//! # Design
//!
//! These are pure value types, `Copy` with equality-by-value. This file
//! defines the types, their string representations, and their `FromStr`
//! parsers. Version arithmetic lives in `version.rs`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ReleaseType ──────────────────────────────────────────────────────────────

/// Semantic-version increment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
}

impl ReleaseType {
    /// All kinds in survey order (smallest increment first).
    pub const ALL: [ReleaseType; 3] = [Self::Patch, Self::Minor, Self::Major];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }

    /// Capitalised label used in prompts.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Patch => "Patch",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(DomainError::InvalidReleaseType {
                input: s.to_string(),
            }),
        }
    }
}

// ── ProjectType ──────────────────────────────────────────────────────────────

/// Broad project flavour chosen during `neko init`.
///
/// Each flavour suggests a release system; the user may still pick another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Frontend,
    Backend,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [Self::Frontend, Self::Backend, Self::Other];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Other => "other",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Frontend => "Frontend (JavaScript / TypeScript)",
            Self::Backend => "Backend (Java / JVM)",
            Self::Other => "Other (Go, binaries, anything else)",
        }
    }

    /// Name of the release system suggested for this flavour.
    pub const fn default_release_system(&self) -> &'static str {
        match self {
            Self::Frontend => "release-it",
            Self::Backend => "jreleaser",
            Self::Other => "goreleaser",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidProjectType {
                input: s.to_string(),
            }),
        }
    }
}
