//! release-it backend for Node.js projects.

use neko_core::{
    application::{
        ApplicationError, ReleaseStep, StepExecutor, StepReport, Tool, ports::CommandSpec,
        release_type_survey,
    },
    domain::{ProjectConfig, ReleaseType, Version},
    error::NekoResult,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{ToolDeps, common};

pub const RELEASE_IT_CONFIG: &str = ".release-it.json";
const SCHEMA_URL: &str = "https://unpkg.com/release-it/schema/release-it.json";

/// The subset of `.release-it.json` neko writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseItConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub github: GithubSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSection {
    pub release: bool,
}

impl Default for ReleaseItConfig {
    fn default() -> Self {
        Self {
            schema: SCHEMA_URL.to_string(),
            github: GithubSection { release: true },
        }
    }
}

pub struct ReleaseIt {
    deps: ToolDeps,
}

impl ReleaseIt {
    pub fn new(deps: ToolDeps) -> Self {
        Self { deps }
    }

    /// release-it commits, tags and publishes by itself.
    pub fn steps(next: &Version) -> Vec<ReleaseStep> {
        let version = next.to_string();
        vec![
            ReleaseStep::dry_run(
                "release-it dry run",
                CommandSpec::new("npx").args(["release-it", version.as_str(), "--ci", "--dry-run"]),
            ),
            ReleaseStep::publish(
                "release-it release",
                CommandSpec::new("npx").args(["release-it", version.as_str(), "--ci"]),
            ),
        ]
    }

    fn write_config(&self) -> NekoResult<()> {
        let path = self.deps.workdir.join(RELEASE_IT_CONFIG);
        let write_error = |reason: String| ApplicationError::ConfigWriteError {
            path: path.clone(),
            reason,
        };
        let mut body = serde_json::to_string_pretty(&ReleaseItConfig::default())
            .map_err(|e| write_error(e.to_string()))?;
        body.push('\n');
        std::fs::write(&path, body).map_err(|e| write_error(e.to_string()))?;
        info!(file = RELEASE_IT_CONFIG, "Wrote release-it configuration");
        Ok(())
    }
}

impl Tool for ReleaseIt {
    fn name(&self) -> &'static str {
        "release-it"
    }

    fn supports_survey(&self) -> bool {
        true
    }

    fn survey(&self, current: &Version) -> NekoResult<ReleaseType> {
        release_type_survey(self.deps.survey.as_ref(), current)
    }

    #[instrument(skip_all, fields(next = %next, kind = %kind))]
    fn release(&self, next: &Version, kind: ReleaseType) -> NekoResult<StepReport> {
        StepExecutor::new(self.deps.runner.as_ref(), self.deps.policy)
            .execute(self.name(), &Self::steps(next))
    }

    #[instrument(skip_all, fields(project = %config.project_name))]
    fn init(&self, _current: &Version, config: &ProjectConfig) -> NekoResult<()> {
        let runner = self.deps.runner.as_ref();
        common::require_binary(runner, "npm")?;

        if self.deps.workdir.join(RELEASE_IT_CONFIG).exists() {
            info!(file = RELEASE_IT_CONFIG, "Skipping release-it init, configuration already exists");
        } else {
            if !self.deps.workdir.join("package.json").exists() {
                warn!("No package.json found, this does not look like a Node.js project");
            }
            common::init_command(
                runner,
                self.name(),
                CommandSpec::new("npm").args(["install", "-D", "release-it"]),
            )?;
            self.write_config()?;
        }

        let out = common::init_command(
            runner,
            self.name(),
            CommandSpec::new("npx").args(["release-it", "-v"]),
        )?;
        info!(version = %out.trimmed(), "Verified release-it installation");
        Ok(())
    }

    fn managed_files(&self) -> &'static [&'static str] {
        &["package.json", RELEASE_IT_CONFIG]
    }
}

#[cfg(test)]
mod tests {
    use neko_core::{application::ports::CommandOutput, domain::ProjectType};

    use super::*;
    use crate::{process::ScriptedRunner, tools::testing};

    fn config() -> ProjectConfig {
        ProjectConfig::new("site", "acme", ProjectType::Frontend, "release-it", &Version::new(0, 1, 0))
    }

    #[test]
    fn release_passes_explicit_version() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new();
        let tool = ReleaseIt::new(testing::deps(&runner, dir.path(), None));

        tool.release(&Version::new(3, 0, 0), ReleaseType::Major).unwrap();
        assert_eq!(
            runner.command_lines(),
            vec!["npx release-it 3.0.0 --ci --dry-run", "npx release-it 3.0.0 --ci"]
        );
    }

    #[test]
    fn init_installs_and_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new().on("npx", &["release-it", "-v"], CommandOutput::ok("19.0.4\n"));
        let tool = ReleaseIt::new(testing::deps(&runner, dir.path(), None));

        tool.init(&Version::new(0, 1, 0), &config()).unwrap();

        assert!(runner.ran("npm", &["install", "-D", "release-it"]));
        let written: ReleaseItConfig = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(RELEASE_IT_CONFIG)).unwrap(),
        )
        .unwrap();
        assert_eq!(written, ReleaseItConfig::default());
    }

    #[test]
    fn failed_install_is_init_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new().on("npm", &["install"], CommandOutput::failed(1, "E404"));
        let tool = ReleaseIt::new(testing::deps(&runner, dir.path(), None));

        let err = tool.init(&Version::new(0, 1, 0), &config()).unwrap_err();
        assert_eq!(err.code(), "NEKO_4008");
        assert!(!dir.path().join(RELEASE_IT_CONFIG).exists());
    }
}
