pub mod error;
pub mod file;
pub mod memory;
pub mod ports;

pub use error::{StorageError, StorageErrorKind};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use ports::KeyValueStore;
