//! The capability set every release backend implements.

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Survey, steps::StepReport},
    domain::{ProjectConfig, ReleaseType, Version, next_version},
    error::NekoResult,
};

/// Prompt shown by [`release_type_survey`].
pub const RELEASE_TYPE_PROMPT: &str = "Which type of release do you want to create?";

/// A pluggable release backend (goreleaser, jreleaser, release-it, ...).
///
/// Implemented by:
/// - `neko_adapters::tools::GoReleaser`
/// - `neko_adapters::tools::JReleaser`
/// - `neko_adapters::tools::ReleaseIt`
pub trait Tool: Send + Sync {
    /// Stable identifier matched against `ProjectConfig::release_system`.
    fn name(&self) -> &'static str;

    /// Whether [`Tool::survey`] may be called.
    fn supports_survey(&self) -> bool;

    /// Let the operator pick the increment kind for `current`.
    fn survey(&self, current: &Version) -> NekoResult<ReleaseType>;

    /// Perform the backend's ordered release steps for `next`.
    fn release(&self, next: &Version, kind: ReleaseType) -> NekoResult<StepReport>;

    /// Prepare the backend's own configuration in the repository.
    fn init(&self, current: &Version, config: &ProjectConfig) -> NekoResult<()>;

    /// Files the backend owns, listed in `neko init` next steps.
    fn managed_files(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Survey shared by the built-in tools: `Patch → x`, `Minor → y`, `Major → z`.
///
/// Candidate versions come from [`next_version`], the same function the
/// orchestrator uses for the released version.
pub fn release_type_survey(survey: &dyn Survey, current: &Version) -> NekoResult<ReleaseType> {
    let options = ReleaseType::ALL
        .iter()
        .map(|kind| Ok(format!("{} \u{2192} {}", kind.label(), next_version(current, *kind)?)))
        .collect::<NekoResult<Vec<String>>>()?;

    let choice = survey.select(RELEASE_TYPE_PROMPT, &options, 0)?;
    let kind = ReleaseType::ALL
        .get(choice)
        .copied()
        .ok_or(ApplicationError::InvalidSelection {
            index: choice,
            options: options.len(),
        })?;

    debug!(%kind, "Release type chosen interactively");
    Ok(kind)
}
