//! Survey adapters.
//!
//! The interactive terminal survey lives in `neko-cli`; this crate ships the
//! scripted one used by tests and non-interactive callers.

mod scripted;

pub use scripted::{Answer, ScriptedSurvey};
