//! Integration tests for neko-core, driven through the public API only.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use neko_core::application::{ReleaseStep, StepExecutor, services::Gate};
use neko_core::prelude::*;

/// Git double answering from a fixed repository state; records every call.
struct FakeGit {
    dirty: bool,
    tag: Option<&'static str>,
    fail_dry_run: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeGit {
    fn healthy(tag: Option<&'static str>) -> Self {
        Self {
            dirty: false,
            tag,
            fail_dry_run: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeGit {
    fn run(&self, spec: &CommandSpec) -> NekoResult<CommandOutput> {
        self.calls.lock().unwrap().push(spec.to_string());
        let out = if spec.is("git", &["remote", "-v"]) {
            CommandOutput::ok("origin\tgit@github.com:acme/widget.git (fetch)\n")
        } else if spec.is("git", &["status", "--porcelain"]) {
            CommandOutput::ok(if self.dirty { "?? notes.txt\n" } else { "" })
        } else if spec.is("git", &["rev-parse", "--abbrev-ref", "HEAD"]) {
            CommandOutput::ok("main\n")
        } else if spec.is("git", &["status", "-sb"]) {
            CommandOutput::ok("## main...origin/main\n")
        } else if spec.is("git", &["describe", "--tags", "--abbrev=0"]) {
            match self.tag {
                Some(tag) => CommandOutput::ok(format!("{tag}\n")),
                None => CommandOutput::failed(128, "fatal: No names found"),
            }
        } else if spec.program == "backend" && spec.args.first().is_some_and(|a| a == "--dry-run") {
            if self.fail_dry_run {
                CommandOutput::failed(1, "dry run exploded")
            } else {
                CommandOutput::ok("")
            }
        } else {
            CommandOutput::ok("")
        };
        Ok(out)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/bin").join(program))
    }
}

#[derive(Default)]
struct MemStore {
    config: Mutex<Option<ProjectConfig>>,
}

impl ConfigStore for MemStore {
    fn load(&self) -> NekoResult<ProjectConfig> {
        self.config.lock().unwrap().clone().ok_or_else(|| {
            ApplicationError::ConfigNotFound {
                path: self.location(),
            }
            .into()
        })
    }

    fn save(&self, config: &ProjectConfig) -> NekoResult<()> {
        *self.config.lock().unwrap() = Some(config.clone());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.config.lock().unwrap().is_some()
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(".neko.json")
    }
}

/// Backend that runs a dry run and a publish step through the executor.
struct Backend {
    runner: Arc<FakeGit>,
}

impl Tool for Backend {
    fn name(&self) -> &'static str {
        "backend"
    }

    fn supports_survey(&self) -> bool {
        false
    }

    fn survey(&self, _current: &Version) -> NekoResult<ReleaseType> {
        Err(ApplicationError::InteractiveModeUnsupported {
            tool: self.name().into(),
        }
        .into())
    }

    fn release(&self, next: &Version, _kind: ReleaseType) -> NekoResult<StepReport> {
        let steps = [
            ReleaseStep::dry_run(
                "dry run",
                CommandSpec::new("backend").args(["--dry-run", next.to_string().as_str()]),
            ),
            ReleaseStep::publish(
                "publish",
                CommandSpec::new("backend").args(["publish", next.to_string().as_str()]),
            ),
        ];
        StepExecutor::new(self.runner.as_ref(), ReleasePolicy::default()).execute(self.name(), &steps)
    }

    fn init(&self, _current: &Version, _config: &ProjectConfig) -> NekoResult<()> {
        Ok(())
    }
}

fn setup(git: FakeGit, version: &str) -> (Arc<FakeGit>, Arc<MemStore>, ToolRegistry) {
    let git = Arc::new(git);
    let store = Arc::new(MemStore::default());
    store
        .save(&ProjectConfig::new(
            "widget",
            "acme",
            ProjectType::Backend,
            "backend",
            &Version::parse(version).unwrap(),
        ))
        .unwrap();
    let registry = ToolRegistry::builder()
        .with(Box::new(Backend {
            runner: Arc::clone(&git),
        }))
        .build();
    (git, store, registry)
}

fn request(kind: &str, preflight: PreflightPolicy) -> ReleaseRequest {
    ReleaseRequest {
        release_type: Some(kind.into()),
        preflight,
    }
}

#[test]
fn test_full_release_workflow() {
    let (git, store, registry) = setup(FakeGit::healthy(Some("v1.4.2")), "1.4.2");
    let repo = RepositoryContext::new(git.clone());

    let outcome = ReleaseService::new(store.clone(), repo, &registry)
        .run(&request("major", PreflightPolicy::Strict))
        .unwrap();

    assert_eq!(outcome.repo.slug(), "acme/widget");
    assert_eq!(outcome.next, Version::new(2, 0, 0));
    assert_eq!(outcome.steps.completed, vec!["dry run", "publish"]);
    assert_eq!(store.load().unwrap().version, "2.0.0");
    assert!(git.calls().contains(&"backend publish 2.0.0".to_string()));
}

#[test]
fn test_dirty_tree_blocks_strict_release() {
    let (git, store, registry) = setup(
        FakeGit {
            dirty: true,
            ..FakeGit::healthy(None)
        },
        "0.1.0",
    );
    let repo = RepositoryContext::new(git.clone());

    let err = ReleaseService::new(store.clone(), repo, &registry)
        .run(&request("patch", PreflightPolicy::Strict))
        .unwrap_err();

    assert_eq!(err.code(), "NEKO_1004");
    assert_eq!(store.load().unwrap().version, "0.1.0");
    assert!(!git.calls().iter().any(|c| c.starts_with("backend")));
}

#[test]
fn test_dirty_tree_reported_in_advisory_mode() {
    let (git, store, registry) = setup(
        FakeGit {
            dirty: true,
            ..FakeGit::healthy(None)
        },
        "0.1.0",
    );
    let repo = RepositoryContext::new(git);

    let outcome = ReleaseService::new(store, repo, &registry)
        .run(&request("patch", PreflightPolicy::Advisory))
        .unwrap();

    assert_eq!(outcome.preflight.failed_gates(), vec![Gate::CleanTree]);
    assert_eq!(outcome.next, Version::new(0, 1, 1));
}

#[test]
fn test_failed_dry_run_is_downgraded() {
    let (git, store, registry) = setup(
        FakeGit {
            fail_dry_run: true,
            ..FakeGit::healthy(Some("0.9.0"))
        },
        "0.9.0",
    );
    let repo = RepositoryContext::new(git);

    let outcome = ReleaseService::new(store, repo, &registry)
        .run(&request("minor", PreflightPolicy::Strict))
        .unwrap();

    assert!(outcome.steps.has_warnings());
    assert_eq!(outcome.steps.completed, vec!["publish"]);
    assert_eq!(outcome.next, Version::new(0, 10, 0));
}

#[test]
fn test_missing_config_is_reported() {
    let git = Arc::new(FakeGit::healthy(None));
    let registry = ToolRegistry::new();
    let err = ReleaseService::new(
        Arc::new(MemStore::default()),
        RepositoryContext::new(git),
        &registry,
    )
    .run(&request("patch", PreflightPolicy::Strict))
    .unwrap_err();
    assert_eq!(err.code(), "NEKO_3001");
}
