//! Inspect Service - read-only queries behind `neko validate` and `neko version`.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ports::{ConfigStore, ReleaseApi},
        registry::ToolRegistry,
        services::repository::RepositoryContext,
    },
    domain::{DomainValidator, ProjectConfig, RemoteRelease, RepoInfo},
    error::NekoResult,
};

/// The latest published release of the current repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    pub repo: RepoInfo,
    /// `None` when nothing has been published yet.
    pub release: Option<RemoteRelease>,
}

pub struct InspectService<'a> {
    store: Arc<dyn ConfigStore>,
    registry: &'a ToolRegistry,
}

impl<'a> InspectService<'a> {
    pub fn new(store: Arc<dyn ConfigStore>, registry: &'a ToolRegistry) -> Self {
        Self { store, registry }
    }

    /// Load the record and check it, including that its release system is
    /// registered.
    #[instrument(skip_all)]
    pub fn validate(&self) -> NekoResult<ProjectConfig> {
        let config = self.store.load()?;
        DomainValidator::validate_config(&config)?;
        self.registry.get(&config.release_system)?;
        debug!(system = %config.release_system, "Configuration is valid");
        Ok(config)
    }
}

/// Look up the latest release, if the repository can be identified.
///
/// An unidentified repository is not an error here; the lookup is skipped.
#[instrument(skip_all)]
pub fn latest_release(
    repo: &RepositoryContext,
    api: &dyn ReleaseApi,
) -> NekoResult<Option<LatestRelease>> {
    let info = match repo.current() {
        Ok(info) => info,
        Err(err) => {
            warn!(error = %err, "Skipping release lookup");
            return Ok(None);
        }
    };
    let release = api.latest_release(&info)?;
    Ok(Some(LatestRelease {
        repo: info,
        release,
    }))
}
