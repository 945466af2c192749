//! Process runner using std::process.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use neko_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    error::NekoResult,
};
use tracing::{debug, trace};

/// Production runner: blocking child processes in a fixed working directory.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    workdir: PathBuf,
}

impl SystemCommandRunner {
    /// Run every command inside `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(".")
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> NekoResult<CommandOutput> {
        debug!(command = %spec, workdir = %self.workdir.display(), "Executing command");

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandSpawn {
                program: spec.program.clone(),
                reason: e.to_string(),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        trace!(code = ?output.status.code(), output = %text.trim(), "Command finished");

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: text,
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let runner = SystemCommandRunner::default();
        let err = runner
            .run(&CommandSpec::new("neko-definitely-not-installed"))
            .unwrap_err();
        assert_eq!(err.code(), "NEKO_4006");
    }

    #[test]
    fn locate_misses_unknown_program() {
        assert!(
            SystemCommandRunner::default()
                .locate("neko-definitely-not-installed")
                .is_none()
        );
    }

    #[cfg(unix)]
    #[test]
    fn captures_combined_output_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemCommandRunner::new(dir.path());
        let out = runner
            .run(
                &CommandSpec::new("sh")
                    .args(["-c", "echo out; echo err >&2; echo $NEKO_PROBE; exit 3"])
                    .env("NEKO_PROBE", "probe"),
            )
            .unwrap();

        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert!(out.output.contains("out"));
        assert!(out.output.contains("err"));
        assert!(out.output.contains("probe"));
    }

    #[cfg(unix)]
    #[test]
    fn runs_inside_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let out = SystemCommandRunner::new(dir.path())
            .run(&CommandSpec::new("ls"))
            .unwrap();
        assert!(out.success);
        assert!(out.output.contains("marker.txt"));
    }
}
