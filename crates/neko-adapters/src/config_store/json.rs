//! `.neko.json` on disk.

use std::io;
use std::path::{Path, PathBuf};

use neko_core::{
    application::{ApplicationError, ports::ConfigStore},
    domain::ProjectConfig,
    error::NekoResult,
};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".neko.json";

/// Stores the record as pretty-printed JSON (two-space indent, trailing newline).
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/.neko.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> NekoResult<ProjectConfig> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::ConfigNotFound {
                path: self.path.clone(),
            },
            _ => ApplicationError::FileAccess {
                path: self.path.clone(),
                reason: e.to_string(),
            },
        })?;

        let config: ProjectConfig =
            serde_json::from_str(&raw).map_err(|e| ApplicationError::ConfigParseError {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(path = %self.path.display(), system = %config.release_system, "Loaded configuration");
        Ok(config)
    }

    fn save(&self, config: &ProjectConfig) -> NekoResult<()> {
        let write_error = |reason: String| ApplicationError::ConfigWriteError {
            path: self.path.clone(),
            reason,
        };

        let mut body = serde_json::to_string_pretty(config).map_err(|e| write_error(e.to_string()))?;
        body.push('\n');
        std::fs::write(&self.path, body).map_err(|e| write_error(e.to_string()))?;

        debug!(path = %self.path.display(), version = %config.version, "Saved configuration");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
