use std::{
    collections::BTreeMap,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};

use crate::storage::{
    error::{StorageError, corrupt_error, io_error, serialization_error},
    ports::KeyValueStore,
};

const STORE_VERSION: u64 = 1;

/// Durable store: a single JSON document rewritten atomically on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntries {
    version: u64,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        tracing::debug!(
            target: "storage",
            path = %path.display(),
            entries = entries.len(),
            "file_store_opened"
        );

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        if entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        save_entries(&self.path, &next)?;
        *entries = next;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);
        save_entries(&self.path, &next)?;
        *entries = next;
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => {
            return Err(io_error(format!(
                "failed to read storage file '{}': {err}",
                path.display()
            )));
        }
    };

    let parsed: PersistedEntries = serde_json::from_str(&content).map_err(|err| {
        corrupt_error(format!(
            "failed to parse storage file '{}': {err}",
            path.display()
        ))
    })?;
    if parsed.version != STORE_VERSION {
        return Err(corrupt_error(format!(
            "unsupported storage file version {} at '{}'",
            parsed.version,
            path.display()
        )));
    }

    Ok(parsed.entries)
}

fn save_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| {
        io_error(format!(
            "failed to create storage directory '{}': {err}",
            parent.display()
        ))
    })?;

    let persisted = PersistedEntries {
        version: STORE_VERSION,
        entries: entries.clone(),
    };

    let tmp_path = path.with_extension("tmp");
    let file = fs::File::create(&tmp_path).map_err(|err| {
        io_error(format!(
            "failed to create storage temp file '{}': {err}",
            tmp_path.display()
        ))
    })?;
    {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &persisted).map_err(|err| {
            serialization_error(format!(
                "failed to serialize storage file '{}': {err}",
                tmp_path.display()
            ))
        })?;
        writer.write_all(b"\n").map_err(|err| {
            io_error(format!(
                "failed to finalize storage file '{}': {err}",
                tmp_path.display()
            ))
        })?;
        writer.flush().map_err(|err| {
            io_error(format!(
                "failed to flush storage file '{}': {err}",
                tmp_path.display()
            ))
        })?;
    }

    fs::rename(&tmp_path, path).map_err(|err| {
        io_error(format!(
            "failed to replace storage file '{}' from '{}': {err}",
            path.display(),
            tmp_path.display()
        ))
    })?;

    Ok(())
}
