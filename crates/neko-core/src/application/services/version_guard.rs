//! Version Guard - reconciles the configured version with the latest tag.

use tracing::{info, instrument, warn};

use crate::{
    application::services::repository::RepositoryContext,
    domain::{DomainError, DomainValidator, Version, parse_tag, parse_version},
    error::NekoResult,
};

/// Decide the authoritative baseline from the configured version and a tag.
///
/// The local version must parse. A tag that does not parse is ignored with a
/// warning. Otherwise the local version must not be lower than the tag.
pub fn ensure_version_is_valid(local: &str, latest_tag: &str) -> NekoResult<Version> {
    let local_version = parse_version(local).map_err(|e| match e {
        DomainError::InvalidVersion { input, reason } => DomainError::VersionViolation {
            version: input,
            reason: format!("not a valid semantic version: {reason}"),
        },
        other => other,
    })?;

    let tag_version = match parse_tag(latest_tag) {
        Ok(v) => v,
        Err(e) => {
            warn!(tag = %latest_tag, error = %e, "Latest tag is not a semantic version, ignoring it");
            return Ok(local_version);
        }
    };

    DomainValidator::ensure_not_behind(&local_version, &tag_version)?;
    Ok(local_version)
}

pub struct VersionGuard<'a> {
    repo: &'a RepositoryContext,
}

impl<'a> VersionGuard<'a> {
    pub fn new(repo: &'a RepositoryContext) -> Self {
        Self { repo }
    }

    /// Fetch, read the latest tag and validate `local` against it.
    #[instrument(skip_all, fields(local = %local))]
    pub fn check(&self, local: &str) -> NekoResult<Version> {
        self.repo.fetch();
        let tag = self.repo.latest_tag();
        let version = ensure_version_is_valid(local, &tag)?;
        info!(%version, %tag, "Version guard passed");
        Ok(version)
    }
}
