//! Neko Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Neko
//! release orchestrator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             neko-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ReleaseService, InitService, Tools)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CommandRunner, ConfigStore, Survey...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     neko-adapters (Infrastructure)      │
//! │ (SystemCommandRunner, JsonConfigStore)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Version, ProjectConfig, RepoInfo)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use neko_core::prelude::*;
//!
//! # fn run(
//! #     runner: Arc<dyn CommandRunner>,
//! #     store: Arc<dyn ConfigStore>,
//! #     tools: Vec<Box<dyn Tool>>,
//! # ) -> NekoResult<()> {
//! let registry = ToolRegistry::builder().with_all(tools).build();
//! let repo = RepositoryContext::new(runner);
//!
//! let outcome = ReleaseService::new(store, repo, &registry).run(&ReleaseRequest {
//!     release_type: Some("minor".into()),
//!     ..Default::default()
//! })?;
//! println!("released {}", outcome.next);
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, InitOutcome, InitRequest, InitService, InspectService, PreflightPolicy,
        ReleaseOutcome, ReleasePolicy, ReleaseRequest, ReleaseService, RepositoryContext,
        StepReport, Tool, ToolRegistry,
        ports::{CommandOutput, CommandRunner, CommandSpec, ConfigStore, ReleaseApi, Survey},
    };
    pub use crate::domain::{
        DomainError, ProjectConfig, ProjectType, ReleaseType, RemoteRelease, RepoInfo, Version,
        next_version,
    };
    pub use crate::error::{NekoError, NekoResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
