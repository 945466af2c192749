//! In-memory configuration store for testing.

use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use neko_core::{
    application::{ApplicationError, ports::ConfigStore},
    domain::ProjectConfig,
    error::{NekoError, NekoResult},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    config: Option<ProjectConfig>,
    read_only: bool,
    saves: usize,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectConfig) -> Self {
        let store = Self::new();
        store.inner.write().unwrap().config = Some(config);
        store
    }

    /// Make every `save` fail with `ConfigWriteError`.
    pub fn read_only(self) -> Self {
        self.inner.write().unwrap().read_only = true;
        self
    }

    /// Current record (testing helper).
    pub fn current(&self) -> Option<ProjectConfig> {
        self.inner.read().unwrap().config.clone()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.inner.read().unwrap().saves
    }
}

fn poisoned() -> NekoError {
    NekoError::Internal {
        message: "config store lock poisoned".into(),
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> NekoResult<ProjectConfig> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        inner.config.clone().ok_or_else(|| {
            ApplicationError::ConfigNotFound {
                path: self.location(),
            }
            .into()
        })
    }

    fn save(&self, config: &ProjectConfig) -> NekoResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        if inner.read_only {
            return Err(ApplicationError::ConfigWriteError {
                path: self.location(),
                reason: "store is read-only".into(),
            }
            .into());
        }
        inner.config = Some(config.clone());
        inner.saves += 1;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.inner.read().map(|i| i.config.is_some()).unwrap_or(false)
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://.neko.json")
    }
}
