//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "release the next version" or "create the
//! project configuration".

pub mod init_service;
pub mod inspect_service;
pub mod preflight;
pub mod release_service;
pub mod release_type;
pub mod repository;
pub mod version_guard;

pub use init_service::{InitOutcome, InitRequest, InitService};
pub use inspect_service::{InspectService, LatestRelease, latest_release};
pub use preflight::{Gate, GateFailure, PreflightPolicy, PreflightReport, PreflightValidator};
pub use release_service::{ReleaseOutcome, ReleaseRequest, ReleaseService, RunStage};
pub use release_type::ReleaseTypeResolver;
pub use repository::{INITIAL_TAG, RELEASE_BRANCHES, RepositoryContext};
pub use version_guard::{VersionGuard, ensure_version_is_valid};
