//! Init Service - interactive creation of `.neko.json`.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ConfigStore, Survey},
        registry::ToolRegistry,
        services::repository::RepositoryContext,
    },
    domain::{DomainValidator, ProjectConfig, ProjectType, RepoInfo, Version, parse_version},
    error::{NekoError, NekoResult},
};

pub const OVERWRITE_PROMPT: &str = ".neko.json already exists. Overwrite it?";
pub const PROJECT_TYPE_PROMPT: &str = "What kind of project is this?";
pub const RELEASE_SYSTEM_PROMPT: &str = "Which release system should be used?";
pub const VERSION_PROMPT: &str = "Initial version:";
pub const DEFAULT_INITIAL_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    /// Overwrite an existing configuration without asking.
    pub force: bool,
    /// Project name used when the repository identity is unknown.
    pub fallback_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created {
        config: ProjectConfig,
        managed_files: Vec<&'static str>,
    },
    /// The existing configuration was kept.
    Kept,
}

pub struct InitService<'a> {
    store: Arc<dyn ConfigStore>,
    survey: Arc<dyn Survey>,
    repo: RepositoryContext,
    registry: &'a ToolRegistry,
}

impl<'a> InitService<'a> {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        survey: Arc<dyn Survey>,
        repo: RepositoryContext,
        registry: &'a ToolRegistry,
    ) -> Self {
        Self {
            store,
            survey,
            repo,
            registry,
        }
    }

    /// Run the wizard, save the record and initialise the chosen tool.
    #[instrument(skip_all, fields(force = request.force))]
    pub fn run(&self, request: &InitRequest) -> NekoResult<InitOutcome> {
        if self.store.exists() && !request.force && !self.confirm_overwrite()? {
            return Ok(InitOutcome::Kept);
        }

        let project_type = self.ask_project_type()?;
        let release_system = self.ask_release_system(project_type)?;
        let version = self.ask_version()?;

        let identity = match self.repo.current() {
            Ok(info) => Some(info),
            Err(err) => {
                warn!(error = %err, "Repository identity unknown, using directory name");
                None
            }
        };
        let (name, owner) = match identity {
            Some(RepoInfo { owner, repo }) => (repo, owner),
            None => (request.fallback_name.clone(), String::new()),
        };

        let config = ProjectConfig::new(name, owner, project_type, release_system, &version);
        DomainValidator::validate_config(&config)?;
        self.store.save(&config)?;
        info!(path = %self.store.location().display(), "Configuration written");

        let tool = self.registry.get(&config.release_system)?;
        tool.init(&version, &config)?;
        info!(tool = tool.name(), "Initialization complete");

        Ok(InitOutcome::Created {
            managed_files: tool.managed_files().to_vec(),
            config,
        })
    }

    fn confirm_overwrite(&self) -> NekoResult<bool> {
        match self.survey.confirm(OVERWRITE_PROMPT, false) {
            Ok(true) => Ok(true),
            Ok(false) => {
                warn!("Existing .neko.json was not overwritten");
                Ok(false)
            }
            Err(NekoError::Application(ApplicationError::SurveyCancelled)) => {
                warn!("Initialization cancelled");
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    fn ask_project_type(&self) -> NekoResult<ProjectType> {
        let options: Vec<String> = ProjectType::ALL
            .iter()
            .map(|t| t.description().to_string())
            .collect();
        let idx = self.survey.select(PROJECT_TYPE_PROMPT, &options, 0)?;
        ProjectType::ALL.get(idx).copied().ok_or_else(|| {
            ApplicationError::InvalidSelection {
                index: idx,
                options: options.len(),
            }
            .into()
        })
    }

    /// Suggested system first, then every other registered tool.
    fn ask_release_system(&self, project_type: ProjectType) -> NekoResult<String> {
        let suggested = project_type.default_release_system();
        let mut options: Vec<String> = Vec::with_capacity(self.registry.len());
        if self.registry.contains(suggested) {
            options.push(suggested.to_string());
        }
        options.extend(
            self.registry
                .names()
                .into_iter()
                .filter(|n| *n != suggested)
                .map(String::from),
        );

        let idx = self.survey.select(RELEASE_SYSTEM_PROMPT, &options, 0)?;
        let offered = options.len();
        options.into_iter().nth(idx).ok_or_else(|| {
            ApplicationError::InvalidSelection {
                index: idx,
                options: offered,
            }
            .into()
        })
    }

    fn ask_version(&self) -> NekoResult<Version> {
        let raw = self.survey.input(VERSION_PROMPT, DEFAULT_INITIAL_VERSION)?;
        Ok(parse_version(&raw)?)
    }
}
