//! Core domain layer for Neko.
//!
//! This module contains pure release rules: version arithmetic, the
//! project configuration record and repository identity. All git, process,
//! filesystem and network concerns are handled via ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, process or network calls
//! - **Few crates**: std, thiserror, serde, semver and regex
//! - **Value semantics**: All domain objects are Clone + PartialEq
pub mod entities;
pub mod error;
pub mod value_objects;
pub mod version;

mod validation;

pub use entities::{ProjectConfig, ReleaseAuthor, RemoteRelease, RepoInfo};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
pub use value_objects::{ProjectType, ReleaseType};
pub use version::{Version, cmp_precedence, next_version, parse_tag, parse_version};
