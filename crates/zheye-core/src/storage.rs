// ── Durable key-value storage ──
//
// Survives process restarts and holds the session token and cached profile.
// Treated as always available: write failures are logged, never surfaced.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized `UserProfile`.
pub const USER_KEY: &str = "user";

/// Synchronous string key-value store.
pub trait DurableStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// ── In-memory ───────────────────────────────────────────────────────

/// Process-local storage. Used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
    }
}

// ── JSON file ───────────────────────────────────────────────────────

/// Storage backed by a single JSON object on disk.
///
/// The file is read once at open; every write rewrites it whole.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also
    /// starts empty and is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "storage file is corrupt; starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "storage file unreadable; starting empty");
                HashMap::new()
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "opened durable storage");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        if let Err(e) = write_json(&self.path, entries) {
            warn!(path = %self.path.display(), error = %e, "failed to persist storage");
        }
    }
}

fn write_json(path: &Path, entries: &HashMap<String, String>) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, raw)
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}
