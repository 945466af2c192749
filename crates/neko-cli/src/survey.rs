//! Terminal implementation of the [`Survey`] port.
//!
//! Prompts are drawn with `dialoguer` on stderr.  Escape or Ctrl-C maps to
//! `SurveyCancelled`.  Builds without the `interactive` feature refuse to
//! prompt at all.

use neko_core::{application::ports::Survey, error::NekoResult};

#[cfg(feature = "interactive")]
pub use terminal::TerminalSurvey;

#[cfg(not(feature = "interactive"))]
pub use headless::TerminalSurvey;

/// Message used when a prompt cannot be shown.
const NO_PROMPT: &str = "interactive prompts are unavailable; pass the release type on the command line";

#[cfg(feature = "interactive")]
mod terminal {
    use std::io;

    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use neko_core::{application::ApplicationError, error::NekoError};
    use tracing::debug;

    use super::{NO_PROMPT, NekoResult, Survey};

    #[derive(Default)]
    pub struct TerminalSurvey {
        theme: ColorfulTheme,
    }

    impl TerminalSurvey {
        pub fn new() -> Self {
            Self::default()
        }

        fn ensure_attended(&self) -> NekoResult<()> {
            if console::user_attended_stderr() {
                Ok(())
            } else {
                Err(NekoError::Configuration {
                    message: NO_PROMPT.into(),
                })
            }
        }
    }

    fn map_err(err: dialoguer::Error) -> NekoError {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
                ApplicationError::SurveyCancelled.into()
            }
            other => NekoError::Configuration {
                message: format!("prompt failed: {other}"),
            },
        }
    }

    fn answered<T>(answer: Option<T>) -> NekoResult<T> {
        answer.ok_or_else(|| ApplicationError::SurveyCancelled.into())
    }

    impl Survey for TerminalSurvey {
        fn select(&self, prompt: &str, options: &[String], default: usize) -> NekoResult<usize> {
            self.ensure_attended()?;
            debug!(prompt, options = options.len(), "Prompting for a choice");
            let choice = Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(options)
                .default(default.min(options.len().saturating_sub(1)))
                .interact_opt()
                .map_err(map_err)?;
            answered(choice)
        }

        fn confirm(&self, prompt: &str, default: bool) -> NekoResult<bool> {
            self.ensure_attended()?;
            let answer = Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact_opt()
                .map_err(map_err)?;
            answered(answer)
        }

        fn input(&self, prompt: &str, default: &str) -> NekoResult<String> {
            self.ensure_attended()?;
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default.to_string())
                .interact_text()
                .map(|s| s.trim().to_string())
                .map_err(map_err)
        }
    }
}

#[cfg(not(feature = "interactive"))]
mod headless {
    use neko_core::error::NekoError;

    use super::{NO_PROMPT, NekoResult, Survey};

    #[derive(Debug, Default)]
    pub struct TerminalSurvey;

    impl TerminalSurvey {
        pub fn new() -> Self {
            Self
        }
    }

    fn refuse<T>() -> NekoResult<T> {
        Err(NekoError::Configuration {
            message: NO_PROMPT.into(),
        })
    }

    impl Survey for TerminalSurvey {
        fn select(&self, _prompt: &str, _options: &[String], _default: usize) -> NekoResult<usize> {
            refuse()
        }

        fn confirm(&self, _prompt: &str, _default: bool) -> NekoResult<bool> {
            refuse()
        }

        fn input(&self, _prompt: &str, _default: &str) -> NekoResult<String> {
            refuse()
        }
    }
}
