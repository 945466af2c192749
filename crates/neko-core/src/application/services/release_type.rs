//! Release Type Resolver - increment kind from an argument or a survey.

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, tool::Tool},
    domain::{ReleaseType, Version, next_version},
    error::NekoResult,
};

pub struct ReleaseTypeResolver;

impl ReleaseTypeResolver {
    /// Resolve the increment for `current`.
    ///
    /// An explicit argument wins and is parsed case-insensitively. Without
    /// one the tool's survey is used, provided the tool has one.
    #[instrument(skip_all, fields(tool = tool.name(), arg = ?arg))]
    pub fn resolve(current: &Version, arg: Option<&str>, tool: &dyn Tool) -> NekoResult<ReleaseType> {
        if let Some(raw) = arg {
            let kind: ReleaseType = raw.parse()?;
            let next = next_version(current, kind)?;
            info!(%kind, "Applying {kind} ({current} \u{2192} {next})");
            return Ok(kind);
        }

        if !tool.supports_survey() {
            return Err(ApplicationError::InteractiveModeUnsupported {
                tool: tool.name().to_string(),
            }
            .into());
        }

        tool.survey(current)
    }
}
