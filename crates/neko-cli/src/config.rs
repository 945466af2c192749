//! Tool settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns settings; the core crate only sees the policies derived
//! from them.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `NEKO_*` environment variables, `__` between sections
//!    (`NEKO_RELEASE__STRICT_PREFLIGHT=false`)
//! 3. `--config FILE`, or `neko.toml` in the project directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use neko_adapters::{config_store::CONFIG_FILE_NAME, github::DEFAULT_API_URL};
use neko_core::prelude::{PreflightPolicy, ReleasePolicy};

use crate::cli::global::GlobalArgs;

/// Settings file looked up in the project directory.
pub const SETTINGS_FILE_NAME: &str = "neko.toml";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectSettings,
    pub release: ReleaseSettings,
    pub github: GithubSettings,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Project record, relative to the project directory unless absolute.
    pub config_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseSettings {
    /// Stop at the first failed preflight gate.
    pub strict_preflight: bool,
    pub continue_on_dry_run_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    /// Name of the environment variable holding the token.
    pub token_env: String,
    pub api_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(CONFIG_FILE_NAME),
        }
    }
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self {
            strict_preflight: true,
            continue_on_dry_run_failure: ReleasePolicy::default().continue_on_dry_run_failure,
        }
    }
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            token_env: "GITHUB_TOKEN".into(),
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl AppConfig {
    /// Load settings for this invocation.
    ///
    /// A file passed with `--config` must exist; the project-local
    /// `neko.toml` is optional.
    pub fn load(global: &GlobalArgs) -> anyhow::Result<Self> {
        Self::load_with_env(global, None)
    }

    /// Like [`Self::load`], reading `NEKO_*` variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        global: &GlobalArgs,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let (path, required) = match &global.config {
            Some(path) => (path.clone(), true),
            None => (Self::settings_path(&global.project_dir), false),
        };

        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix("NEKO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("failed to read settings from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Path of the project-local settings file.
    pub fn settings_path(project_dir: &Path) -> PathBuf {
        project_dir.join(SETTINGS_FILE_NAME)
    }

    /// Where `.neko.json` lives for this project.
    pub fn config_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.project.config_file)
    }

    /// Preflight policy for a run; `--advisory` always wins.
    pub fn preflight_policy(&self, advisory: bool) -> PreflightPolicy {
        if advisory || !self.release.strict_preflight {
            PreflightPolicy::Advisory
        } else {
            PreflightPolicy::Strict
        }
    }

    pub fn release_policy(&self) -> ReleasePolicy {
        ReleasePolicy {
            continue_on_dry_run_failure: self.release.continue_on_dry_run_failure,
        }
    }

    /// GitHub token from the configured environment variable, if set.
    pub fn github_token(&self) -> Option<String> {
        std::env::var(&self.github.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}
