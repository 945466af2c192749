//! Application layer for Neko.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ReleaseService, InitService)
//! - **Tools**: The release backend contract, its registry and step execution
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Version rules live in `crate::domain`; this layer sequences them against
//! git, the config record and the chosen backend.

pub mod error;
pub mod ports;
pub mod registry;
pub mod services;
pub mod steps;
pub mod tool;

pub use services::{
    InitOutcome, InitRequest, InitService, InspectService, LatestRelease, PreflightPolicy,
    PreflightReport, ReleaseOutcome, ReleaseRequest, ReleaseService, RepositoryContext,
};

pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use steps::{ReleasePolicy, ReleaseStep, StepExecutor, StepKind, StepReport};
pub use tool::{RELEASE_TYPE_PROMPT, Tool, release_type_survey};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutput, CommandRunner, CommandSpec, ConfigStore, ReleaseApi, Survey};

pub use error::ApplicationError;
