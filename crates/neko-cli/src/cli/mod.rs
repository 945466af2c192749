//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "neko",
    bin_name = "neko",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f431} Release orchestration for git repositories",
    long_about = "Neko checks that a repository is ready to release, works out \
                  the next semantic version and hands it to the configured \
                  release system (goreleaser, jreleaser or release-it).",
    after_help = "EXAMPLES:\n\
        \x20 neko init\n\
        \x20 neko release minor\n\
        \x20 neko release            # pick the increment interactively\n\
        \x20 neko -C ../api validate --show\n\
        \x20 neko completions bash > /usr/share/bash-completion/completions/neko",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cut a new release.
    #[command(
        visible_alias = "r",
        about = "Run preflight checks and publish the next version",
        after_help = "EXAMPLES:\n\
            \x20 neko release patch\n\
            \x20 neko release Major\n\
            \x20 neko release minor --advisory"
    )]
    Release(ReleaseArgs),

    /// Create `.neko.json` for this repository.
    #[command(
        about = "Initialize the project configuration",
        after_help = "EXAMPLES:\n\
            \x20 neko init\n\
            \x20 neko init --force   # overwrite an existing .neko.json"
    )]
    Init(InitArgs),

    /// Check `.neko.json`.
    #[command(
        visible_alias = "check",
        about = "Validate the project configuration",
        after_help = "EXAMPLES:\n\
            \x20 neko validate\n\
            \x20 neko validate --show"
    )]
    Validate(ValidateArgs),

    /// Show build information and the latest published release.
    #[command(about = "Show version information")]
    Version,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 neko completions bash > ~/.local/share/bash-completion/completions/neko\n\
            \x20 neko completions zsh  > ~/.zfunc/_neko\n\
            \x20 neko completions fish > ~/.config/fish/completions/neko.fish"
    )]
    Completions(CompletionsArgs),
}

// ── release ───────────────────────────────────────────────────────────────────

/// Arguments for `neko release`.
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    /// Increment kind, case-insensitive.  Asked for interactively when
    /// omitted and the release system supports it.
    #[arg(value_name = "TYPE", help = "patch, minor or major")]
    pub release_type: Option<String>,

    /// Report failed preflight checks instead of stopping.
    #[arg(long = "advisory", help = "Continue when preflight checks fail")]
    pub advisory: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `neko init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(
        short = 'f',
        long = "force",
        help = "Overwrite an existing .neko.json without asking"
    )]
    pub force: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `neko validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(short = 's', long = "show", help = "Print the configuration fields")]
    pub show: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `neko completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_release_with_type() {
        let cli = Cli::parse_from(["neko", "release", "Minor"]);
        match cli.command {
            Commands::Release(args) => {
                assert_eq!(args.release_type.as_deref(), Some("Minor"));
                assert!(!args.advisory);
            }
            other => panic!("expected Release, got {other:?}"),
        }
    }

    #[test]
    fn release_type_is_optional() {
        let cli = Cli::parse_from(["neko", "r", "--advisory"]);
        let Commands::Release(args) = cli.command else {
            panic!("expected Release command");
        };
        assert!(args.release_type.is_none());
        assert!(args.advisory);
    }

    #[test]
    fn project_dir_defaults_to_cwd() {
        let cli = Cli::parse_from(["neko", "validate"]);
        assert_eq!(cli.global.project_dir, std::path::PathBuf::from("."));
    }

    #[test]
    fn project_dir_is_global() {
        let cli = Cli::parse_from(["neko", "validate", "-C", "/srv/app", "--show"]);
        assert_eq!(cli.global.project_dir, std::path::PathBuf::from("/srv/app"));
        assert!(matches!(cli.command, Commands::Validate(ValidateArgs { show: true })));
    }

    #[test]
    fn powershell_value_name() {
        let cli = Cli::parse_from(["neko", "completions", "powershell"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(CompletionsArgs {
                shell: Shell::PowerShell
            })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["neko", "--quiet", "--verbose", "version"]);
        assert!(result.is_err());
    }
}
