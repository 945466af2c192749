//! Preflight Validator - repository state gate run before any mutation.
//!
//! Remote refs are fetched first so the up-to-date gate compares against the
//! remote as it is now. Gates then run in a fixed order and are all
//! evaluated, so the operator sees every problem at once. The [`PreflightPolicy`] decides whether a failed
//! gate stops the run.

use std::fmt;

use tracing::{error, info, instrument};

use crate::{
    application::{ApplicationError, services::repository::RepositoryContext},
    error::{NekoError, NekoResult},
};

/// How failed gates are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreflightPolicy {
    /// The first failed gate aborts the run.
    #[default]
    Strict,
    /// Failures are reported and the run continues.
    Advisory,
}

/// One repository-state check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    CleanTree,
    AttachedHead,
    ReleaseBranch,
    Upstream,
    UpToDate,
}

impl Gate {
    /// Evaluation order.
    pub const ORDER: [Gate; 5] = [
        Self::CleanTree,
        Self::AttachedHead,
        Self::ReleaseBranch,
        Self::Upstream,
        Self::UpToDate,
    ];

    pub const fn title(&self) -> &'static str {
        match self {
            Self::CleanTree => "Uncommitted Changes",
            Self::AttachedHead => "Detached HEAD",
            Self::ReleaseBranch => "Incorrect Branch",
            Self::Upstream => "No Upstream Branch",
            Self::UpToDate => "Branch Out of Date",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateFailure {
    pub gate: Gate,
    pub error: NekoError,
}

/// Outcome of a preflight run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreflightReport {
    /// Failed gates in evaluation order.
    pub failures: Vec<GateFailure>,
}

impl PreflightReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_gates(&self) -> Vec<Gate> {
        self.failures.iter().map(|f| f.gate).collect()
    }
}

pub struct PreflightValidator<'a> {
    repo: &'a RepositoryContext,
    policy: PreflightPolicy,
}

impl<'a> PreflightValidator<'a> {
    pub fn new(repo: &'a RepositoryContext, policy: PreflightPolicy) -> Self {
        Self { repo, policy }
    }

    /// Fetch remote refs, then evaluate every gate.
    ///
    /// Under [`PreflightPolicy::Strict`] the first failure is returned as the
    /// error; under [`PreflightPolicy::Advisory`] the report is returned even
    /// when it contains failures.
    #[instrument(skip_all, fields(policy = ?self.policy))]
    pub fn run(&self) -> NekoResult<PreflightReport> {
        info!("Running pre-flight checks");
        self.repo.fetch();

        let mut report = PreflightReport::default();
        for gate in Gate::ORDER {
            if let Err(err) = self.check(gate) {
                error!(gate = %gate, code = err.code(), "{err}");
                report.failures.push(GateFailure { gate, error: err });
            }
        }

        if report.passed() {
            info!("Preflight checks succeeded");
            return Ok(report);
        }

        match self.policy {
            PreflightPolicy::Strict => Err(report.failures.swap_remove(0).error),
            PreflightPolicy::Advisory => Ok(report),
        }
    }

    fn check(&self, gate: Gate) -> NekoResult<()> {
        let ok = match gate {
            Gate::CleanTree => self.repo.is_clean()?,
            Gate::AttachedHead => self.repo.is_attached()?,
            Gate::ReleaseBranch => self.repo.on_release_branch()?,
            Gate::Upstream => self.repo.has_upstream()?,
            Gate::UpToDate => self.repo.is_up_to_date()?,
        };
        if ok {
            return Ok(());
        }

        let err = match gate {
            Gate::CleanTree => ApplicationError::DirtyWorkingTree,
            Gate::AttachedHead => ApplicationError::DetachedHead,
            Gate::ReleaseBranch => ApplicationError::WrongBranch {
                branch: self.branch(),
            },
            Gate::Upstream => ApplicationError::NoUpstream {
                branch: self.branch(),
            },
            Gate::UpToDate => ApplicationError::BranchBehind {
                branch: self.branch(),
            },
        };
        Err(err.into())
    }

    fn branch(&self) -> String {
        self.repo
            .current_branch()
            .unwrap_or_else(|_| "HEAD".to_string())
    }
}
