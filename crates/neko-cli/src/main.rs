//! # Neko CLI
//!
//! Release orchestration for git repositories.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` and parse CLI arguments (`--help` / `--version` exit early).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load tool settings (defaults + `neko.toml` + `NEKO_*`).
//! 4. Build the [`OutputManager`] and the adapter [`commands::Context`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success (including `--help`/`--version`) |
//! |  1   | Any fatal error, argument errors included |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    commands::Context,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod survey;

fn main() -> ExitCode {
    // Missing .env is fine; real deployments use the environment.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        project_dir = %cli.global.project_dir.display(),
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    match run(cli) {
        Ok(()) => {
            info!("Neko completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    let global = &cli.global;
    match cli.command {
        Commands::Release(cmd) => {
            let (ctx, output) = setup(global)?;
            commands::release::execute(cmd, &ctx, &output)
        }
        Commands::Init(cmd) => {
            let (ctx, output) = setup(global)?;
            commands::init::execute(cmd, &ctx, &output)
        }
        Commands::Validate(cmd) => {
            let (ctx, output) = setup(global)?;
            commands::validate::execute(cmd, &ctx, &output)
        }
        Commands::Version => {
            let (ctx, output) = setup(global)?;
            commands::version::execute(&ctx, &output)
        }
        // Needs neither settings nor a repository.
        Commands::Completions(cmd) => commands::completions::execute(cmd),
    }
}

/// Steps 3 and 4: load settings, then build the output manager and context.
fn setup(global: &GlobalArgs) -> CliResult<(Context, OutputManager)> {
    let config = AppConfig::load(global)?;
    let output = OutputManager::new(global, &config);
    let ctx = Context::new(global, config)?;
    Ok((ctx, output))
}

/// Translate a `CliError` into a user message and an exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
