//! Infrastructure adapters for Neko.
//!
//! This crate implements the ports defined in `neko-core::application::ports`.
//! It contains all external dependencies and I/O operations: child processes,
//! the `.neko.json` file, the built-in release backends and the GitHub API.

pub mod config_store;
pub mod github;
pub mod process;
pub mod survey;
pub mod tools;

// Re-export commonly used adapters
pub use config_store::{JsonConfigStore, MemoryConfigStore};
pub use github::GithubClient;
pub use process::{ScriptedRunner, SystemCommandRunner};
pub use survey::{Answer, ScriptedSurvey};
pub use tools::{ToolDeps, builtin};
