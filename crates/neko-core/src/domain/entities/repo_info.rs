use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SSH_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"git@github\.com:([^/]+)/([^/\s]+?)(?:\.git)?(?:\s|$)")
        .expect("ssh remote pattern compiles")
});

static HTTPS_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/([^/]+)/([^/\s]+?)(?:\.git)?(?:\s|$)")
        .expect("https remote pattern compiles")
});

/// Repository identity derived from the `origin` remote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoInfo {
    pub owner: String,
    pub repo: String,
}

impl RepoInfo {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Extract the identity from `git remote -v` output.
    ///
    /// SSH remotes are tried before HTTPS ones. Returns `None` when no
    /// GitHub remote is present.
    pub fn parse_remote(remotes: &str) -> Option<Self> {
        [&*SSH_REMOTE, &*HTTPS_REMOTE].into_iter().find_map(|re| {
            re.captures(remotes)
                .map(|caps| Self::new(&caps[1], &caps[2]))
        })
    }

    /// `owner/repo` form used in display and API paths.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
