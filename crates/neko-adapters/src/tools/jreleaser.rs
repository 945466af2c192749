//! JReleaser backend for JVM projects.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use neko_core::{
    application::{
        ApplicationError, ReleaseStep, StepExecutor, StepReport, Tool, ports::CommandSpec,
        release_type_survey,
    },
    domain::{ProjectConfig, ReleaseType, Version},
    error::NekoResult,
};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{info, instrument};

use super::{ToolDeps, common};

pub const JRELEASER_CONFIG: &str = "jreleaser.yml";
const TOKEN_VAR: &str = "JRELEASER_GITHUB_TOKEN";

// ── jreleaser.yml model ───────────────────────────────────────────────────────

/// The `jreleaser.yml` neko generates on init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JReleaserConfig {
    pub project: Project,
    pub release: Release,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub authors: Vec<String>,
    pub license: String,
    pub languages: Languages,
    pub inception_year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Languages {
    pub java: Java,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Java {
    pub group_id: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub github: GithubRelease,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRelease {
    pub overwrite: bool,
    pub owner: String,
    pub name: String,
    pub tag_name: String,
    pub release_name: String,
    pub changelog: Changelog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changelog {
    pub enabled: bool,
    pub sort: String,
    pub skip_merge_commits: bool,
    pub formatted: String,
    pub preset: String,
    pub append: ChangelogAppend,
    pub include_labels: Vec<String>,
    pub labelers: Vec<Labeler>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogAppend {
    pub enabled: bool,
    pub title: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labeler {
    pub label: String,
    pub title: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub key: String,
    pub labels: Vec<String>,
    pub order: u32,
}

/// (label, order) pairs; each label is matched by `regex:<label>`.
const LABELERS: [(&str, u32); 10] = [
    ("feat", 1),
    ("feature", 1),
    ("fix", 2),
    ("bug", 2),
    ("refactor", 3),
    ("improvement", 3),
    ("docs", 4),
    ("chore", 5),
    ("test", 6),
    ("hotfix", 7),
];

const CATEGORIES: [(&str, &str, &[&str]); 7] = [
    ("Features", "features", &["feat", "feature"]),
    ("Bug Fixes", "fixes", &["fix", "bug"]),
    ("Refactoring", "refactor", &["refactor", "improvement"]),
    ("Documentation", "docs", &["docs"]),
    ("Chores", "chore", &["chore"]),
    ("Tests", "test", &["test"]),
    ("Hotfixes", "hotfix", &["hotfix"]),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl JReleaserConfig {
    /// Default configuration for `config`, released from `version`.
    pub fn for_project(config: &ProjectConfig, version: &Version, inception_year: i32) -> Self {
        let name = &config.project_name;
        let tag = format!("{name}@{{{{projectVersion}}}}");
        Self {
            project: Project {
                name: name.clone(),
                version: version.to_string(),
                description: None,
                authors: vec![config.project_owner.clone()],
                license: "Proprietary".into(),
                languages: Languages {
                    java: Java {
                        group_id: format!("at.{name}"),
                        version: "25".into(),
                    },
                },
                inception_year: inception_year.to_string(),
            },
            release: Release {
                github: GithubRelease {
                    overwrite: false,
                    owner: config.project_owner.clone(),
                    name: name.clone(),
                    tag_name: tag.clone(),
                    release_name: tag,
                    changelog: Changelog {
                        enabled: true,
                        sort: "DESC".into(),
                        skip_merge_commits: true,
                        formatted: "ALWAYS".into(),
                        preset: "conventional-commits".into(),
                        append: ChangelogAppend {
                            enabled: true,
                            title: "## [{{tagName}}]".into(),
                            target: "CHANGELOG.md".into(),
                        },
                        include_labels: strings(&[
                            "feature", "feat", "fix", "refactor", "improvement", "chore", "test",
                            "docs", "hotfix",
                        ]),
                        labelers: LABELERS
                            .iter()
                            .map(|(label, order)| Labeler {
                                label: label.to_string(),
                                title: format!("regex:{label}"),
                                order: *order,
                            })
                            .collect(),
                        categories: CATEGORIES
                            .iter()
                            .enumerate()
                            .map(|(i, (title, key, labels))| Category {
                                title: title.to_string(),
                                key: key.to_string(),
                                labels: strings(labels),
                                order: i as u32 + 1,
                            })
                            .collect(),
                    },
                },
            },
        }
    }
}

/// Rewrite `project.version` in place, keeping every other key as written.
pub fn sync_version(path: &Path, next: &Version) -> NekoResult<()> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ApplicationError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => ApplicationError::FileAccess {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let parse_error = |reason: String| ApplicationError::ConfigParseError {
        path: path.to_path_buf(),
        reason,
    };
    let mut doc: Value = serde_yaml::from_str(&raw).map_err(|e| parse_error(e.to_string()))?;
    let project = doc
        .get_mut("project")
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| parse_error("missing 'project' section".into()))?;
    project.insert(Value::from("version"), Value::from(next.to_string()));

    write_yaml(path, &doc)?;
    info!(version = %next, "JReleaser version updated");
    Ok(())
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> NekoResult<()> {
    let write_error = |reason: String| ApplicationError::ConfigWriteError {
        path: path.to_path_buf(),
        reason,
    };
    let body = serde_yaml::to_string(value).map_err(|e| write_error(e.to_string()))?;
    std::fs::write(path, body).map_err(|e| write_error(e.to_string()))?;
    Ok(())
}

// ── Tool ──────────────────────────────────────────────────────────────────────

pub struct JReleaser {
    deps: ToolDeps,
}

impl JReleaser {
    pub fn new(deps: ToolDeps) -> Self {
        Self { deps }
    }

    fn config_path(&self) -> PathBuf {
        self.deps.workdir.join(JRELEASER_CONFIG)
    }

    fn token(&self) -> NekoResult<&str> {
        self.deps
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApplicationError::MissingToken {
                    var: self.deps.token_env.clone(),
                }
                .into()
            })
    }

    /// Commit and push the version bump, then dry run and release.
    pub fn steps(next: &Version, token: &str) -> Vec<ReleaseStep> {
        vec![
            common::release_commit(next),
            common::push_head(),
            ReleaseStep::dry_run(
                "jreleaser dry run",
                CommandSpec::new("jreleaser")
                    .args(["full-release", "--dry-run"])
                    .env(TOKEN_VAR, token),
            ),
            ReleaseStep::publish(
                "jreleaser release",
                CommandSpec::new("jreleaser")
                    .arg("full-release")
                    .env(TOKEN_VAR, token),
            ),
        ]
    }
}

impl Tool for JReleaser {
    fn name(&self) -> &'static str {
        "jreleaser"
    }

    fn supports_survey(&self) -> bool {
        true
    }

    fn survey(&self, current: &Version) -> NekoResult<ReleaseType> {
        release_type_survey(self.deps.survey.as_ref(), current)
    }

    #[instrument(skip_all, fields(next = %next, kind = %kind))]
    fn release(&self, next: &Version, kind: ReleaseType) -> NekoResult<StepReport> {
        let token = self.token()?;
        sync_version(&self.config_path(), next)?;
        StepExecutor::new(self.deps.runner.as_ref(), self.deps.policy)
            .execute(self.name(), &Self::steps(next, token))
    }

    #[instrument(skip_all, fields(project = %config.project_name))]
    fn init(&self, current: &Version, config: &ProjectConfig) -> NekoResult<()> {
        let runner = self.deps.runner.as_ref();
        common::require_binary(runner, "jreleaser")?;

        let path = self.config_path();
        if path.exists() {
            info!(file = JRELEASER_CONFIG, "Skipping jreleaser init, configuration already exists");
        } else {
            let year = chrono::Local::now().year();
            write_yaml(&path, &JReleaserConfig::for_project(config, current, year))?;
            info!(project = %config.project_name, "JReleaser configuration generated");
        }

        common::init_command(runner, self.name(), CommandSpec::new("jreleaser").arg("config"))?;
        info!("Configuration check passed for jreleaser");
        Ok(())
    }

    fn managed_files(&self) -> &'static [&'static str] {
        &[JRELEASER_CONFIG]
    }
}
