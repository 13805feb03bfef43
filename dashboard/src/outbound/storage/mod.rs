//! Key-value storage adapters for session and theme state.

mod atomic_io;
mod json_file;
mod memory;

pub use json_file::JsonFileKeyValueStore;
pub use memory::MemoryKeyValueStore;
