use crate::storage::error::StorageError;

/// String key/value storage injected into the consent gate and the wizard.
///
/// Durable scope (consent flag) and session scope (stored intake payload) are
/// two separate instances of this port.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn clear(&self, key: &str) -> Result<(), StorageError>;
}
