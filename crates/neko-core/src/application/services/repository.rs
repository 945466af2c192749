//! Repository Context - read-only view of the git checkout.
//!
//! Every git invocation goes through the [`CommandRunner`] port, so the
//! whole context can be driven by a scripted runner in tests.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    domain::RepoInfo,
    error::{NekoError, NekoResult},
};

/// Returned by [`RepositoryContext::latest_tag`] when no tag exists.
pub const INITIAL_TAG: &str = "0.1.0";

/// Branches releases may be cut from.
pub const RELEASE_BRANCHES: [&str; 2] = ["main", "master"];

#[derive(Clone)]
pub struct RepositoryContext {
    runner: Arc<dyn CommandRunner>,
}

impl RepositoryContext {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Owner and repository name from the configured remotes.
    #[instrument(skip_all)]
    pub fn current(&self) -> NekoResult<RepoInfo> {
        let out = self
            .git(&["remote", "-v"])
            .map_err(|e| ApplicationError::NoGitRepo {
                reason: e.to_string(),
            })?;

        if !out.success {
            return Err(ApplicationError::NoGitRepo {
                reason: out.trimmed().to_string(),
            }
            .into());
        }

        let remotes = out.trimmed();
        if remotes.is_empty() {
            return Err(ApplicationError::NoRemote.into());
        }

        let info = RepoInfo::parse_remote(remotes).ok_or_else(|| {
            ApplicationError::InvalidRemoteUrl {
                remotes: remotes.lines().next().unwrap_or_default().to_string(),
            }
        })?;

        debug!(repo = %info, "Repository identified");
        Ok(info)
    }

    /// Update remote refs. Failures are only logged.
    pub fn fetch(&self) {
        match self.git(&["fetch"]) {
            Ok(out) if out.success => debug!("Fetched remote refs"),
            Ok(out) => warn!(output = %out.trimmed(), "git fetch failed, using local refs"),
            Err(e) => warn!(error = %e, "git fetch could not run, using local refs"),
        }
    }

    /// `true` when `git status --porcelain` reports nothing.
    pub fn is_clean(&self) -> NekoResult<bool> {
        let out = self.git_checked(&["status", "--porcelain"])?;
        Ok(out.trimmed().is_empty())
    }

    /// `false` when HEAD is detached.
    pub fn is_attached(&self) -> NekoResult<bool> {
        Ok(self.current_branch()? != "HEAD")
    }

    /// Abbreviated name of the checked-out branch (`HEAD` when detached).
    pub fn current_branch(&self) -> NekoResult<String> {
        let out = self.git_checked(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(out.trimmed().to_string())
    }

    pub fn on_release_branch(&self) -> NekoResult<bool> {
        let branch = self.current_branch()?;
        Ok(RELEASE_BRANCHES.contains(&branch.as_str()))
    }

    pub fn has_upstream(&self) -> NekoResult<bool> {
        let out = self.git_spawned(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])?;
        Ok(out.success && !out.trimmed().is_empty())
    }

    /// `false` when the branch is behind its upstream.
    pub fn is_up_to_date(&self) -> NekoResult<bool> {
        let out = self.git_checked(&["status", "-sb"])?;
        let header = out.trimmed().lines().next().unwrap_or_default();
        Ok(!(header.contains("[behind ") || header.contains(", behind ")))
    }

    /// Most recent tag reachable from HEAD, or [`INITIAL_TAG`].
    pub fn latest_tag(&self) -> String {
        match self.git(&["describe", "--tags", "--abbrev=0"]) {
            Ok(out) if out.success && !out.trimmed().is_empty() => out.trimmed().to_string(),
            Ok(_) | Err(_) => {
                warn!(default = INITIAL_TAG, "No tags found, assuming initial version");
                INITIAL_TAG.to_string()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn git(&self, args: &[&str]) -> NekoResult<CommandOutput> {
        self.runner.run(&CommandSpec::new("git").args(args.iter().copied()))
    }

    /// Run git; only a failure to start it is an error.
    fn git_spawned(&self, args: &[&str]) -> NekoResult<CommandOutput> {
        self.git(args).map_err(unavailable)
    }

    /// Run git; a non-zero exit is an error too.
    fn git_checked(&self, args: &[&str]) -> NekoResult<CommandOutput> {
        let out = self.git_spawned(args)?;
        if out.success {
            Ok(out)
        } else {
            Err(ApplicationError::GitUnavailable {
                reason: format!("git {} failed: {}", args.join(" "), out.trimmed()),
            }
            .into())
        }
    }
}

fn unavailable(err: NekoError) -> NekoError {
    ApplicationError::GitUnavailable {
        reason: err.to_string(),
    }
    .into()
}
