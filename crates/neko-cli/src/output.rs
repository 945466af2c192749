//! User-facing output on stdout.
//!
//! Diagnostics go to stderr through `tracing`; fatal errors are rendered by
//! `CliError` in `main`.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{AnsiColors, OwoColorize};

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

/// Width of the label column printed by [`OutputManager::field`].
const LABEL_WIDTH: usize = 16;

/// Kinds of status line, each with its own marker and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    const fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    const fn color(self) -> AnsiColors {
        match self {
            Self::Success => AnsiColors::Green,
            Self::Warning => AnsiColors::Yellow,
            Self::Info => AnsiColors::Blue,
        }
    }
}

pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when requested by flag or settings, or when stdout is
    /// not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.emit(self.status(Tone::Success, msg))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.emit(self.status(Tone::Warning, msg))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.emit(self.status(Tone::Info, msg))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.emit(line)
    }

    /// `  Label           value`
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        let label = format!("{label:<LABEL_WIDTH$}");
        let line = if self.no_color {
            format!("  {label}{value}")
        } else {
            format!("  {}{}", label.dimmed(), value.bold())
        };
        self.emit(line)
    }

    fn status(&self, tone: Tone, msg: &str) -> String {
        if self.no_color {
            format!("{} {msg}", tone.marker())
        } else {
            format!(
                "{} {}",
                tone.marker().color(tone.color()).bold(),
                msg.color(tone.color())
            )
        }
    }

    /// Everything written here is suppressed by `--quiet`.
    fn emit(&self, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line)
    }
}
