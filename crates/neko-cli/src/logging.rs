//! Tracing subscriber for the `neko` binary.
//!
//! Library crates emit events and never install a subscriber. Verbosity comes
//! from `-v`/`-q` unless `RUST_LOG` is set:
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | warn  |
//! | `-v`      | info  |
//! | `-vv`     | debug |
//! | `-vvv`    | trace |
//! | `--quiet` | error |

use std::io::{self, IsTerminal as _};

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Targets that follow the verbosity flags.
const NEKO_TARGETS: [&str; 3] = ["neko", "neko_core", "neko_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `neko=info,neko_core=info,...`; other crates stay off.
fn directives(level: LevelFilter) -> String {
    NEKO_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn warn_without_flags() {
        assert_eq!(level_for(&flags(0, false)), LevelFilter::WARN);
    }

    #[test]
    fn each_v_raises_the_level() {
        assert_eq!(level_for(&flags(1, false)), LevelFilter::INFO);
        assert_eq!(level_for(&flags(2, false)), LevelFilter::DEBUG);
        assert_eq!(level_for(&flags(3, false)), LevelFilter::TRACE);
        assert_eq!(level_for(&flags(9, false)), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(&flags(0, true)), LevelFilter::ERROR);
        assert_eq!(level_for(&flags(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_cover_every_neko_crate() {
        assert_eq!(
            directives(LevelFilter::DEBUG).to_ascii_lowercase(),
            "neko=debug,neko_core=debug,neko_adapters=debug"
        );
        assert!(EnvFilter::try_new(directives(LevelFilter::WARN)).is_ok());
    }
}
