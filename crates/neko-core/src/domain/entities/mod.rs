pub mod project_config;
pub mod remote_release;
pub mod repo_info;

pub use project_config::ProjectConfig;
pub use remote_release::{ReleaseAuthor, RemoteRelease};
pub use repo_info::RepoInfo;
