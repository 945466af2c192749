//! Command handlers and the wiring they share.
//!
//! [`Context`] is the composition root: it builds the adapters once per
//! invocation and hands them to the core services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use neko_adapters::{JsonConfigStore, SystemCommandRunner, ToolDeps, builtin};
use neko_core::prelude::{CommandRunner, ConfigStore, RepositoryContext, Survey, ToolRegistry};
use tracing::debug;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    survey::TerminalSurvey,
};

pub mod completions;
pub mod init;
pub mod release;
pub mod validate;
pub mod version;

/// Adapters and settings for one invocation.
pub struct Context {
    pub project_dir: PathBuf,
    pub config: AppConfig,
    pub runner: Arc<dyn CommandRunner>,
    pub survey: Arc<dyn Survey>,
    pub store: Arc<dyn ConfigStore>,
}

impl Context {
    /// Production wiring rooted at `--project-dir`.
    pub fn new(global: &GlobalArgs, config: AppConfig) -> CliResult<Self> {
        let project_dir = resolve_project_dir(&global.project_dir)?;
        let store = JsonConfigStore::new(config.config_file(&project_dir));
        debug!(
            project_dir = %project_dir.display(),
            config_file = %store.path().display(),
            "Context ready"
        );
        Ok(Self {
            runner: Arc::new(SystemCommandRunner::new(&project_dir)),
            survey: Arc::new(TerminalSurvey::new()),
            store: Arc::new(store),
            project_dir,
            config,
        })
    }

    pub fn repository(&self) -> RepositoryContext {
        RepositoryContext::new(Arc::clone(&self.runner))
    }

    pub fn tool_deps(&self) -> ToolDeps {
        ToolDeps {
            runner: Arc::clone(&self.runner),
            survey: Arc::clone(&self.survey),
            workdir: self.project_dir.clone(),
            token: self.config.github_token(),
            token_env: self.config.github.token_env.clone(),
            policy: self.config.release_policy(),
        }
    }

    /// Registry of the built-in release systems.
    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::builder()
            .with_all(builtin(&self.tool_deps()))
            .build()
    }

    /// Last path component of the project directory.
    pub fn directory_name(&self) -> String {
        self.project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn resolve_project_dir(dir: &Path) -> CliResult<PathBuf> {
    let resolved = dir.canonicalize().map_err(|source| CliError::ProjectDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(CliError::ProjectDir {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            project_dir: dir.path().join("nope"),
            ..GlobalArgs::default()
        };
        let err = Context::new(&global, AppConfig::default()).err().unwrap();
        assert!(matches!(err, CliError::ProjectDir { .. }));
    }

    #[test]
    fn registry_holds_builtin_systems() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            project_dir: dir.path().to_path_buf(),
            ..GlobalArgs::default()
        };
        let ctx = Context::new(&global, AppConfig::default()).unwrap();
        let registry = ctx.registry();
        for name in ["goreleaser", "jreleaser", "release-it"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert!(!ctx.directory_name().is_empty());
    }
}
