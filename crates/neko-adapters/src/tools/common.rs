//! Steps and checks shared by the backends.

use neko_core::{
    application::{
        ApplicationError, ReleaseStep,
        ports::{CommandOutput, CommandRunner, CommandSpec},
    },
    domain::Version,
    error::NekoResult,
};
use tracing::{debug, info};

pub fn commit_message(next: &Version) -> String {
    format!("chore(neko-release): {next}")
}

pub fn tag_name(next: &Version) -> String {
    format!("v{next}")
}

pub fn release_commit(next: &Version) -> ReleaseStep {
    ReleaseStep::mutation(
        "create release commit",
        CommandSpec::new("git").args(["commit", "--allow-empty", "-a", "-m", commit_message(next).as_str()]),
    )
}

pub fn create_tag(next: &Version) -> ReleaseStep {
    ReleaseStep::mutation(
        "create tag",
        CommandSpec::new("git").args(["tag", tag_name(next).as_str()]),
    )
}

pub fn push_head() -> ReleaseStep {
    ReleaseStep::mutation(
        "push release commit",
        CommandSpec::new("git").args(["push", "origin", "HEAD"]),
    )
}

pub fn push_tag(next: &Version) -> ReleaseStep {
    ReleaseStep::mutation(
        "push tag",
        CommandSpec::new("git").args(["push", "origin", tag_name(next).as_str()]),
    )
}

/// Fail with `DependencyMissing` unless `binary` is on `PATH`.
pub fn require_binary(runner: &dyn CommandRunner, binary: &str) -> NekoResult<()> {
    match runner.locate(binary) {
        Some(path) => {
            debug!(binary, path = %path.display(), "Found dependency");
            Ok(())
        }
        None => Err(ApplicationError::DependencyMissing {
            binary: binary.to_string(),
        }
        .into()),
    }
}

/// Run one initialisation command; any failure becomes `ReleaseSystemInitFailed`.
pub fn init_command(runner: &dyn CommandRunner, tool: &str, spec: CommandSpec) -> NekoResult<CommandOutput> {
    info!(tool, command = %spec, "Running init step");
    let failed = |reason: String| ApplicationError::ReleaseSystemInitFailed {
        tool: tool.to_string(),
        reason: format!("'{spec}' failed: {reason}"),
    };

    let out = runner.run(&spec).map_err(|e| failed(e.to_string()))?;
    if !out.success {
        return Err(failed(out.trimmed().to_string()).into());
    }
    Ok(out)
}
