use std::cmp::Ordering;

use crate::domain::{
    entities::ProjectConfig,
    error::DomainError,
    version::{Version, cmp_precedence},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    /// The local version may equal or run ahead of the latest tag, never
    /// behind it.
    pub fn ensure_not_behind(local: &Version, latest_tag: &Version) -> Result<(), DomainError> {
        match cmp_precedence(local, latest_tag) {
            Ordering::Less => Err(DomainError::VersionViolation {
                version: local.to_string(),
                reason: format!("local version is lower than the latest tag {latest_tag}"),
            }),
            Ordering::Equal | Ordering::Greater => Ok(()),
        }
    }
}
