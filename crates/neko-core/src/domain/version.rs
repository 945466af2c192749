//! Semantic version arithmetic shared by the resolver, the survey and the guard.

use std::cmp::Ordering;

pub use semver::Version;

use crate::domain::{error::DomainError, value_objects::ReleaseType};

/// Compute the next version for `kind`.
///
/// Lower-order components are zeroed and prerelease/build metadata is
/// dropped. This is the single increment used for survey labels and for the
/// version that is actually released. Fails when the bumped component is
/// already `u64::MAX`.
pub fn next_version(current: &Version, kind: ReleaseType) -> Result<Version, DomainError> {
    let bumped = |component: u64| {
        component.checked_add(1).ok_or_else(|| DomainError::VersionViolation {
            version: current.to_string(),
            reason: format!("the {kind} component cannot be incremented any further"),
        })
    };

    Ok(match kind {
        ReleaseType::Major => Version::new(bumped(current.major)?, 0, 0),
        ReleaseType::Minor => Version::new(current.major, bumped(current.minor)?, 0),
        ReleaseType::Patch => Version::new(current.major, current.minor, bumped(current.patch)?),
    })
}

/// Parse a version exactly as written in `.neko.json`.
pub fn parse_version(input: &str) -> Result<Version, DomainError> {
    Version::parse(input.trim()).map_err(|e| DomainError::InvalidVersion {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a git tag, accepting an optional leading `v` or `V`.
pub fn parse_tag(tag: &str) -> Result<Version, DomainError> {
    let trimmed = tag.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    parse_version(bare)
}

/// Compare by semver precedence.
///
/// Build metadata is ignored; a prerelease ranks below the release with the
/// same `major.minor.patch`.
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}
