//! Built-in release backends.
//!
//! Each backend turns a computed version into an ordered list of
//! [`ReleaseStep`](neko_core::application::ReleaseStep)s and hands them to the
//! shared `StepExecutor`.

mod common;
mod goreleaser;
mod jreleaser;
mod release_it;

use std::path::PathBuf;
use std::sync::Arc;

use neko_core::application::{
    ReleasePolicy, Tool,
    ports::{CommandRunner, Survey},
};

pub use goreleaser::GoReleaser;
pub use jreleaser::{JRELEASER_CONFIG, JReleaser, JReleaserConfig};
pub use release_it::{RELEASE_IT_CONFIG, ReleaseIt};

/// Collaborators shared by every backend.
#[derive(Clone)]
pub struct ToolDeps {
    pub runner: Arc<dyn CommandRunner>,
    pub survey: Arc<dyn Survey>,
    /// Repository root; backend files are read and written here.
    pub workdir: PathBuf,
    /// GitHub token, if one was found in the environment.
    pub token: Option<String>,
    /// Variable the token is read from, for error messages.
    pub token_env: String,
    pub policy: ReleasePolicy,
}

/// Every built-in backend, ready for `ToolRegistry::builder().with_all(..)`.
pub fn builtin(deps: &ToolDeps) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(GoReleaser::new(deps.clone())),
        Box::new(JReleaser::new(deps.clone())),
        Box::new(ReleaseIt::new(deps.clone())),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ScriptedRunner;

    #[test]
    fn builtin_names_match_project_type_defaults() {
        let runner = ScriptedRunner::new();
        let tools = builtin(&testing::deps(&runner, std::path::Path::new("."), None));
        let names: Vec<_> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["goreleaser", "jreleaser", "release-it"]);
        assert!(tools.iter().all(|t| t.supports_survey()));
    }
}
