//! Scripted process runner for testing.

use std::{
    collections::HashSet,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use neko_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::{NekoError, NekoResult},
};

/// Answers commands from registered rules and records every call.
///
/// A rule matches when the program is equal and the invocation starts with the
/// rule's arguments. The first matching rule wins; unmatched commands succeed
/// with empty output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<RwLock<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    rules: Vec<Rule>,
    missing: HashSet<String>,
    calls: Vec<CommandSpec>,
}

#[derive(Debug)]
struct Rule {
    program: String,
    args: Vec<String>,
    output: CommandOutput,
}

impl Rule {
    fn matches(&self, spec: &CommandSpec) -> bool {
        self.program == spec.program && spec.args.starts_with(&self.args)
    }
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `program args...` with `output`.
    pub fn on(self, program: &str, args: &[&str], output: CommandOutput) -> Self {
        self.inner.write().unwrap().rules.push(Rule {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            output,
        });
        self
    }

    /// Make `program` unknown: it cannot be located or started.
    pub fn without(self, program: &str) -> Self {
        self.inner.write().unwrap().missing.insert(program.to_string());
        self
    }

    /// Every command run so far.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.inner.read().unwrap().calls.clone()
    }

    /// Rendered command lines, env values masked.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    pub fn ran(&self, program: &str, args: &[&str]) -> bool {
        self.calls().iter().any(|c| c.is(program, args))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> NekoResult<CommandOutput> {
        let mut inner = self.inner.write().map_err(|_| NekoError::Internal {
            message: "scripted runner lock poisoned".into(),
        })?;
        inner.calls.push(spec.clone());

        if inner.missing.contains(&spec.program) {
            return Err(ApplicationError::CommandSpawn {
                program: spec.program.clone(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into());
        }

        Ok(inner
            .rules
            .iter()
            .find(|r| r.matches(spec))
            .map(|r| r.output.clone())
            .unwrap_or_else(|| CommandOutput::ok("")))
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        let inner = self.inner.read().ok()?;
        (!inner.missing.contains(program)).then(|| PathBuf::from("/usr/bin").join(program))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        let runner = ScriptedRunner::new()
            .on("git", &["describe"], CommandOutput::ok("v1.0.0"))
            .on("git", &[], CommandOutput::failed(1, "other"));

        let tag = runner
            .run(&CommandSpec::new("git").args(["describe", "--tags"]))
            .unwrap();
        assert_eq!(tag.trimmed(), "v1.0.0");

        let other = runner.run(&CommandSpec::new("git").arg("fetch")).unwrap();
        assert!(!other.success);
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn missing_program_cannot_start() {
        let runner = ScriptedRunner::new().without("goreleaser");
        assert!(runner.locate("goreleaser").is_none());
        assert!(runner.locate("git").is_some());
        let err = runner.run(&CommandSpec::new("goreleaser")).unwrap_err();
        assert_eq!(err.code(), "NEKO_4006");
        assert!(runner.ran("goreleaser", &[]));
    }
}
