//! Process adapters.

mod scripted;
mod system;

pub use scripted::ScriptedRunner;
pub use system::SystemCommandRunner;
