//! Ordered release sub-steps and the policy that governs their failures.
//!
//! Every built-in backend describes its release as a list of
//! [`ReleaseStep`]s and hands it to [`StepExecutor`], so the rule "a failed
//! dry run only warns" is applied in one place for all of them.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::{NekoError, NekoResult},
};

/// What a step does to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Changes local or remote git state (commit, tag, push).
    Mutation,
    /// Simulates the release without publishing.
    DryRun,
    /// Publishes the release.
    Publish,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mutation => "mutation",
            Self::DryRun => "dry-run",
            Self::Publish => "publish",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStep {
    pub name: String,
    pub kind: StepKind,
    pub command: CommandSpec,
}

impl ReleaseStep {
    pub fn new(name: impl Into<String>, kind: StepKind, command: CommandSpec) -> Self {
        Self {
            name: name.into(),
            kind,
            command,
        }
    }

    pub fn mutation(name: impl Into<String>, command: CommandSpec) -> Self {
        Self::new(name, StepKind::Mutation, command)
    }

    pub fn dry_run(name: impl Into<String>, command: CommandSpec) -> Self {
        Self::new(name, StepKind::DryRun, command)
    }

    pub fn publish(name: impl Into<String>, command: CommandSpec) -> Self {
        Self::new(name, StepKind::Publish, command)
    }
}

/// Failure policy for release steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleasePolicy {
    /// A failing [`StepKind::DryRun`] step is logged and skipped instead of
    /// aborting the release.
    pub continue_on_dry_run_failure: bool,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            continue_on_dry_run_failure: true,
        }
    }
}

/// What happened while executing a step list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepReport {
    pub tool: String,
    /// Steps that completed successfully, in order.
    pub completed: Vec<String>,
    /// Dry-run steps that failed and were downgraded to warnings.
    pub downgraded: Vec<String>,
}

impl StepReport {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            ..Self::default()
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.downgraded.is_empty()
    }
}

/// Runs release steps through a [`CommandRunner`] under a [`ReleasePolicy`].
pub struct StepExecutor<'a> {
    runner: &'a dyn CommandRunner,
    policy: ReleasePolicy,
}

impl<'a> StepExecutor<'a> {
    pub fn new(runner: &'a dyn CommandRunner, policy: ReleasePolicy) -> Self {
        Self { runner, policy }
    }

    /// Execute `steps` in order.
    ///
    /// The first non-downgraded failure stops execution with
    /// `ReleaseFailed`. A program that cannot be started counts as a failed
    /// step.
    #[instrument(skip_all, fields(tool = %tool, steps = steps.len()))]
    pub fn execute(&self, tool: &str, steps: &[ReleaseStep]) -> NekoResult<StepReport> {
        let mut report = StepReport::new(tool);

        for step in steps {
            info!(step = %step.name, kind = %step.kind, command = %step.command, "Running release step");

            let outcome = match self.runner.run(&step.command) {
                Ok(out) => out,
                Err(NekoError::Application(ApplicationError::CommandSpawn { reason, .. })) => {
                    CommandOutput {
                        success: false,
                        code: None,
                        output: reason,
                    }
                }
                Err(other) => return Err(other),
            };

            if outcome.success {
                report.completed.push(step.name.clone());
                continue;
            }

            if step.kind == StepKind::DryRun && self.policy.continue_on_dry_run_failure {
                warn!(
                    step = %step.name,
                    output = %outcome.trimmed(),
                    "Dry run failed, continuing with release"
                );
                report.downgraded.push(step.name.clone());
                continue;
            }

            return Err(ApplicationError::ReleaseFailed {
                tool: tool.to_string(),
                step: step.name.clone(),
                output: outcome.output,
            }
            .into());
        }

        Ok(report)
    }
}
