//! Project configuration stores.

mod json;
mod memory;

pub use json::{CONFIG_FILE_NAME, JsonConfigStore};
pub use memory::MemoryConfigStore;
