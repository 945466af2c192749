//! Name → [`Tool`] map, built once at start-up.
//!
//! There is no global state: the CLI builds a [`ToolRegistry`] from an
//! explicit constructor list and passes it by reference to the services.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    application::{ApplicationError, tool::Tool},
    error::NekoResult,
};

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Insert `tool` under its own name. A second tool with the same name
    /// replaces the first.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            debug!(tool = %name, "Replaced previously registered release tool");
        }
    }

    /// Look up a tool by its configured name.
    pub fn get(&self, name: &str) -> NekoResult<&dyn Tool> {
        self.tools
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| {
                ApplicationError::UnknownReleaseSystem {
                    name: name.to_string(),
                    available: self.names().into_iter().map(String::from).collect(),
                }
                .into()
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

/// Collects tools before freezing them into a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    registry: ToolRegistry,
}

impl ToolRegistryBuilder {
    pub fn with(mut self, tool: Box<dyn Tool>) -> Self {
        self.registry.register(tool);
        self
    }

    pub fn with_all(mut self, tools: impl IntoIterator<Item = Box<dyn Tool>>) -> Self {
        for tool in tools {
            self.registry.register(tool);
        }
        self
    }

    pub fn build(self) -> ToolRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::steps::StepReport,
        domain::{ProjectConfig, ReleaseType, Version},
        error::NekoError,
    };

    struct FakeTool {
        name: &'static str,
        survey: bool,
    }

    impl Tool for FakeTool {
        fn name(&self) -> &'static str {
            self.name
        }
        fn supports_survey(&self) -> bool {
            self.survey
        }
        fn survey(&self, _current: &Version) -> NekoResult<ReleaseType> {
            Ok(ReleaseType::Patch)
        }
        fn release(&self, _next: &Version, _kind: ReleaseType) -> NekoResult<StepReport> {
            Ok(StepReport::new(self.name))
        }
        fn init(&self, _current: &Version, _config: &ProjectConfig) -> NekoResult<()> {
            Ok(())
        }
    }

    fn fake(name: &'static str, survey: bool) -> Box<dyn Tool> {
        Box::new(FakeTool { name, survey })
    }

    #[test]
    fn get_returns_registered_tool() {
        let registry = ToolRegistry::builder()
            .with(fake("goreleaser", true))
            .with(fake("release-it", true))
            .build();

        assert_eq!(registry.get("goreleaser").unwrap().name(), "goreleaser");
        assert_eq!(registry.names(), vec!["goreleaser", "release-it"]);
    }

    #[test]
    fn reregistering_a_name_replaces_it() {
        let registry = ToolRegistry::builder()
            .with(fake("goreleaser", true))
            .with(fake("goreleaser", false))
            .build();

        assert_eq!(registry.len(), 1);
        assert!(!registry.get("goreleaser").unwrap().supports_survey());
    }

    #[test]
    fn unknown_name_fails_with_available_list() {
        let registry = ToolRegistry::builder()
            .with_all([fake("jreleaser", true)])
            .build();

        let err = registry.get("cargo-dist").err().unwrap();
        match err {
            NekoError::Application(ApplicationError::UnknownReleaseSystem { name, available }) => {
                assert_eq!(name, "cargo-dist");
                assert_eq!(available, vec!["jreleaser"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_registry_rejects_everything() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("goreleaser").is_err());
    }
}
