//! Shell completion generation.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

const BIN: &str = "neko";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let script = render(args.shell);
    write_script(&mut io::stdout().lock(), &script)?;
    Ok(())
}

/// Completion script for `shell`.
fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, BIN, &mut buf),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, BIN, &mut buf),
        Shell::Fish => generate(shells::Fish, &mut cmd, BIN, &mut buf),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, BIN, &mut buf),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, BIN, &mut buf),
    };

    buf
}

/// A reader that went away early (`neko completions bash | head`) is not an error.
fn write_script(out: &mut impl Write, script: &[u8]) -> io::Result<()> {
    match out.write_all(script).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
