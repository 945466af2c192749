//! Release Service - the end-to-end release orchestrator.
//!
//! This service coordinates one release run:
//! 1. Load and validate the project configuration
//! 2. Identify the repository (fatal on failure)
//! 3. Run the preflight gates
//! 4. Reconcile the configured version with the latest tag
//! 5. Resolve the release tool and the increment kind
//! 6. Persist the next version (best-effort)
//! 7. Hand the next version to the tool
//!
//! There are no retries; every step either advances the run or ends it.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::ConfigStore,
        registry::ToolRegistry,
        services::{
            preflight::{PreflightPolicy, PreflightReport, PreflightValidator},
            release_type::ReleaseTypeResolver,
            repository::RepositoryContext,
            version_guard::VersionGuard,
        },
        steps::StepReport,
    },
    domain::{DomainValidator, ReleaseType, RepoInfo, Version, next_version},
    error::NekoResult,
};

/// Progress of a run, logged on each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    Identified,
    Preflighted,
    VersionGuarded,
    ToolResolved,
    TypeResolved,
    ConfigUpdated,
    Released,
    Failed,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Inputs of one run.
#[derive(Debug, Clone, Default)]
pub struct ReleaseRequest {
    /// Raw increment argument, parsed case-insensitively.
    pub release_type: Option<String>,
    pub preflight: PreflightPolicy,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub repo: RepoInfo,
    pub tool: String,
    pub baseline: Version,
    pub kind: ReleaseType,
    pub next: Version,
    /// `false` when writing the new version to the config failed.
    pub config_persisted: bool,
    pub preflight: PreflightReport,
    pub steps: StepReport,
}

pub struct ReleaseService<'a> {
    store: Arc<dyn ConfigStore>,
    repo: RepositoryContext,
    registry: &'a ToolRegistry,
}

impl<'a> ReleaseService<'a> {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        repo: RepositoryContext,
        registry: &'a ToolRegistry,
    ) -> Self {
        Self {
            store,
            repo,
            registry,
        }
    }

    /// Run the release pipeline.
    #[instrument(skip_all, fields(release_type = ?request.release_type, preflight = ?request.preflight))]
    pub fn run(&self, request: &ReleaseRequest) -> NekoResult<ReleaseOutcome> {
        let mut stage = RunStage::Start;
        let result = self.run_stages(request, &mut stage);
        match &result {
            Ok(outcome) => info!(next = %outcome.next, tool = %outcome.tool, "Release complete"),
            Err(err) => {
                debug!(from = %stage, to = %RunStage::Failed, code = err.code(), "Release run failed");
            }
        }
        result
    }

    fn run_stages(&self, request: &ReleaseRequest, stage: &mut RunStage) -> NekoResult<ReleaseOutcome> {
        let mut config = self.store.load()?;
        DomainValidator::validate_config(&config)?;

        let repo = self.repo.current()?;
        advance(stage, RunStage::Identified);
        info!(repo = %repo, "Releasing {}", repo);

        let preflight = PreflightValidator::new(&self.repo, request.preflight).run()?;
        advance(stage, RunStage::Preflighted);

        let baseline = VersionGuard::new(&self.repo).check(&config.version)?;
        advance(stage, RunStage::VersionGuarded);

        let tool = self.registry.get(&config.release_system)?;
        advance(stage, RunStage::ToolResolved);

        let kind = ReleaseTypeResolver::resolve(&baseline, request.release_type.as_deref(), tool)?;
        advance(stage, RunStage::TypeResolved);

        let next = next_version(&baseline, kind)?;
        config.set_version(&next);
        let config_persisted = match self.store.save(&config) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    path = %self.store.location().display(),
                    error = %err,
                    "Could not persist the new version, continuing with the release"
                );
                false
            }
        };
        advance(stage, RunStage::ConfigUpdated);

        let steps = tool.release(&next, kind)?;
        advance(stage, RunStage::Released);

        Ok(ReleaseOutcome {
            repo,
            tool: tool.name().to_string(),
            baseline,
            kind,
            next,
            config_persisted,
            preflight,
            steps,
        })
    }
}

fn advance(stage: &mut RunStage, to: RunStage) {
    debug!(from = %stage, %to, "Release stage");
    *stage = to;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        application::{
            ApplicationError,
            ports::{CommandOutput, CommandSpec, MockCommandRunner, MockConfigStore},
            tool::Tool,
        },
        domain::{DomainError, ProjectConfig, ProjectType},
        error::NekoError,
    };

    #[derive(Default)]
    struct RecordingTool {
        releases: Mutex<Vec<(Version, ReleaseType)>>,
    }

    impl Tool for Arc<RecordingTool> {
        fn name(&self) -> &'static str {
            "recording"
        }
        fn supports_survey(&self) -> bool {
            false
        }
        fn survey(&self, _current: &Version) -> NekoResult<ReleaseType> {
            Err(ApplicationError::SurveyCancelled.into())
        }
        fn release(&self, next: &Version, kind: ReleaseType) -> NekoResult<StepReport> {
            self.releases.lock().unwrap().push((next.clone(), kind));
            Ok(StepReport::new("recording"))
        }
        fn init(&self, _current: &Version, _config: &ProjectConfig) -> NekoResult<()> {
            Ok(())
        }
    }

    fn git(tag: Option<&'static str>) -> RepositoryContext {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |spec: &CommandSpec| {
            let out = match spec.args.first().map(String::as_str) {
                Some("remote") => CommandOutput::ok("origin\tgit@github.com:acme/widget.git (fetch)\n"),
                Some("status") if spec.args[1] == "-sb" => CommandOutput::ok("## main...origin/main\n"),
                Some("status") => CommandOutput::ok(""),
                Some("rev-parse") if spec.args.len() == 3 => CommandOutput::ok("main\n"),
                Some("rev-parse") => CommandOutput::ok("origin/main\n"),
                Some("describe") => match tag {
                    Some(t) => CommandOutput::ok(t),
                    None => CommandOutput::failed(128, "fatal: No names found"),
                },
                _ => CommandOutput::ok(""),
            };
            Ok(out)
        });
        RepositoryContext::new(Arc::new(runner))
    }

    fn config(version: &str) -> ProjectConfig {
        ProjectConfig {
            project_name: "widget".into(),
            project_owner: "acme".into(),
            project_type: ProjectType::Other,
            release_system: "recording".into(),
            version: version.into(),
        }
    }

    fn store(cfg: ProjectConfig, save_ok: bool) -> (Arc<MockConfigStore>, Arc<Mutex<Vec<ProjectConfig>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        let mut store = MockConfigStore::new();
        store.expect_load().returning(move || Ok(cfg.clone()));
        store.expect_save().returning(move |c: &ProjectConfig| {
            if save_ok {
                sink.lock().unwrap().push(c.clone());
                Ok(())
            } else {
                Err(ApplicationError::ConfigWriteError {
                    path: ".neko.json".into(),
                    reason: "read-only".into(),
                }
                .into())
            }
        });
        store.expect_location().returning(|| ".neko.json".into());
        (Arc::new(store), saved)
    }

    fn registry(tool: &Arc<RecordingTool>) -> ToolRegistry {
        ToolRegistry::builder().with(Box::new(Arc::clone(tool))).build()
    }

    fn request(kind: Option<&str>) -> ReleaseRequest {
        ReleaseRequest {
            release_type: kind.map(String::from),
            preflight: PreflightPolicy::Strict,
        }
    }

    #[test]
    fn minor_release_from_ahead_config() {
        let tool = Arc::new(RecordingTool::default());
        let registry = registry(&tool);
        let (store, saved) = store(config("1.2.3"), true);

        let outcome = ReleaseService::new(store, git(Some("v1.2.0")), &registry)
            .run(&request(Some("minor")))
            .unwrap();

        assert_eq!(outcome.baseline, Version::new(1, 2, 3));
        assert_eq!(outcome.next, Version::new(1, 3, 0));
        assert!(outcome.config_persisted);
        assert_eq!(saved.lock().unwrap()[0].version, "1.3.0");
        assert_eq!(
            *tool.releases.lock().unwrap(),
            vec![(Version::new(1, 3, 0), ReleaseType::Minor)]
        );
    }

    #[test]
    fn config_behind_tag_never_reaches_tool() {
        let tool = Arc::new(RecordingTool::default());
        let registry = registry(&tool);
        let (store, saved) = store(config("1.0.0"), true);

        let err = ReleaseService::new(store, git(Some("v1.2.0")), &registry)
            .run(&request(Some("patch")))
            .unwrap_err();

        assert!(matches!(err, NekoError::Domain(DomainError::VersionViolation { .. })));
        assert!(tool.releases.lock().unwrap().is_empty());
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn persistence_failure_is_not_fatal() {
        let tool = Arc::new(RecordingTool::default());
        let registry = registry(&tool);
        let (store, _) = store(config("0.1.0"), false);

        let outcome = ReleaseService::new(store, git(None), &registry)
            .run(&request(Some("patch")))
            .unwrap();

        assert!(!outcome.config_persisted);
        assert_eq!(outcome.next, Version::new(0, 1, 1));
        assert_eq!(tool.releases.lock().unwrap().len(), 1);
    }

    #[test]
    fn unknown_release_system_is_fatal() {
        let tool = Arc::new(RecordingTool::default());
        let registry = registry(&tool);
        let mut cfg = config("1.0.0");
        cfg.release_system = "cargo-dist".into();
        let (store, _) = store(cfg, true);

        let err = ReleaseService::new(store, git(Some("v1.0.0")), &registry)
            .run(&request(Some("patch")))
            .unwrap_err();
        assert_eq!(err.code(), "NEKO_4001");
    }

    #[test]
    fn missing_argument_without_survey_fails_before_versioning() {
        let tool = Arc::new(RecordingTool::default());
        let registry = registry(&tool);
        let (store, saved) = store(config("1.0.0"), true);

        let err = ReleaseService::new(store, git(Some("v1.0.0")), &registry)
            .run(&request(None))
            .unwrap_err();

        assert_eq!(err.code(), "NEKO_4003");
        assert!(saved.lock().unwrap().is_empty());
    }
}
