pub mod base_storage;
pub mod file_storage;
pub mod memory_storage;
mod utils;

pub use base_storage::BaseStorage;
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// File extension of persisted blobs.
pub const BLOB_EXTENSION: &str = "json";
