//! GoReleaser backend.

use neko_core::{
    application::{
        ReleaseStep, StepExecutor, StepReport, Tool, ports::CommandSpec, release_type_survey,
    },
    domain::{ProjectConfig, ReleaseType, Version},
    error::NekoResult,
};
use tracing::{info, instrument};

use super::{ToolDeps, common};

const CONFIG_FILE: &str = ".goreleaser.yaml";

pub struct GoReleaser {
    deps: ToolDeps,
}

impl GoReleaser {
    pub fn new(deps: ToolDeps) -> Self {
        Self { deps }
    }

    /// Commit, tag and push, then a snapshot build and the real release.
    pub fn steps(next: &Version) -> Vec<ReleaseStep> {
        vec![
            common::release_commit(next),
            common::create_tag(next),
            common::push_head(),
            common::push_tag(next),
            ReleaseStep::dry_run(
                "goreleaser dry run",
                CommandSpec::new("goreleaser").args(["release", "--snapshot", "--clean"]),
            ),
            ReleaseStep::publish(
                "goreleaser release",
                CommandSpec::new("goreleaser").args(["release", "--clean"]),
            ),
        ]
    }
}

impl Tool for GoReleaser {
    fn name(&self) -> &'static str {
        "goreleaser"
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
        common::require_binary(runner, "goreleaser")?;

        if self.deps.workdir.join(CONFIG_FILE).exists() {
            info!(file = CONFIG_FILE, "Skipping goreleaser init, configuration already exists");
        } else {
            common::init_command(runner, self.name(), CommandSpec::new("goreleaser").arg("init"))?;
        }

        common::init_command(runner, self.name(), CommandSpec::new("goreleaser").arg("check"))?;
        info!("Configuration check passed for goreleaser");
        Ok(())
    }

    fn managed_files(&self) -> &'static [&'static str] {
        &[CONFIG_FILE]
    }
}
