//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `neko-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CommandRunner`: git and release backend processes
//!   - `ConfigStore`: `.neko.json` persistence
//!   - `Survey`: interactive prompts
//!   - `ReleaseApi`: latest published release lookup
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandOutput, CommandRunner, CommandSpec, ConfigStore, ReleaseApi, Survey};

#[cfg(test)]
pub use output::{MockCommandRunner, MockConfigStore, MockReleaseApi, MockSurvey};
