use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::ProjectType,
    version::{Version, parse_version},
};

/// The declarative per-repository configuration stored in `.neko.json`.
///
/// Keys are written in camelCase. The kebab-case keys produced by earlier
/// releases are still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(alias = "project-name")]
    pub project_name: String,

    #[serde(alias = "project-owner", default)]
    pub project_owner: String,

    #[serde(alias = "project-type")]
    pub project_type: ProjectType,

    /// Name of a registered release tool.
    #[serde(alias = "release-system")]
    pub release_system: String,

    /// Current released (or initial) version.
    pub version: String,
}

impl ProjectConfig {
    pub fn new(
        project_name: impl Into<String>,
        project_owner: impl Into<String>,
        project_type: ProjectType,
        release_system: impl Into<String>,
        version: &Version,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_owner: project_owner.into(),
            project_type,
            release_system: release_system.into(),
            version: version.to_string(),
        }
    }

    /// Check the field-level invariants.
    ///
    /// Whether `release_system` names a registered tool is checked against
    /// the registry by the caller.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project_name.trim().is_empty() {
            return Err(DomainError::InvalidConfig {
                field: "projectName",
                reason: "must not be empty".into(),
            });
        }
        if self.release_system.trim().is_empty() {
            return Err(DomainError::InvalidConfig {
                field: "releaseSystem",
                reason: "must not be empty".into(),
            });
        }
        self.parsed_version().map(|_| ())
    }

    /// The configured version, parsed strictly.
    pub fn parsed_version(&self) -> Result<Version, DomainError> {
        parse_version(&self.version).map_err(|e| match e {
            DomainError::InvalidVersion { input, reason } => DomainError::VersionViolation {
                version: input,
                reason,
            },
            other => other,
        })
    }

    pub fn set_version(&mut self, version: &Version) {
        self.version = version.to_string();
    }
}
