//! Token storage backends.

mod file;
mod memory;

pub use file::FileTokenStorage;
pub use memory::MemoryTokenStorage;
