//! Key-value persistence for tournament snapshots.
//!
//! The session is stored under four keys, each holding a string: `teams`, `mode`, `matches` and
//! `knockoutRounds`. Everything except `mode` is JSON text.

use crate::models::{Mode, Tournament};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

pub const TEAMS_KEY: &str = "teams";
pub const MODE_KEY: &str = "mode";
pub const MATCHES_KEY: &str = "matches";
pub const KNOCKOUT_ROUNDS_KEY: &str = "knockoutRounds";

const JSON_KEYS: [&str; 3] = [TEAMS_KEY, MATCHES_KEY, KNOCKOUT_ROUNDS_KEY];

/// String-to-string store that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object on disk. The whole file is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`. A missing file is an empty store; so is an unreadable one (with a warning).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("Store file {} is not valid JSON ({}); starting empty", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("Could not read store file {} ({}); starting empty", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Write the whole session under the four keys.
pub fn save_tournament<S: KeyValueStore + ?Sized>(store: &mut S, tournament: &Tournament) -> io::Result<()> {
    store.set(TEAMS_KEY, serde_json::to_string(&tournament.teams)?)?;
    store.set(MODE_KEY, tournament.mode.as_str().to_string())?;
    store.set(MATCHES_KEY, serde_json::to_string(&tournament.matches)?)?;
    store.set(KNOCKOUT_ROUNDS_KEY, serde_json::to_string(&tournament.knockout_rounds)?)?;
    Ok(())
}

/// Read the session back. Absent keys fall back to empty; if any stored value fails to parse,
/// the whole snapshot is ignored and a fresh session is returned.
pub fn load_tournament<S: KeyValueStore + ?Sized>(store: &S) -> Tournament {
    let mut snapshot = Map::new();
    for key in JSON_KEYS {
        let Some(raw) = store.get(key) else {
            continue;
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => {
                snapshot.insert(key.to_string(), value);
            }
            Err(e) => {
                log::warn!("Stored \"{}\" is not valid JSON ({}); starting a fresh tournament", key, e);
                return Tournament::new();
            }
        }
    }

    let mode = match store.get(MODE_KEY) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            log::warn!("Ignoring stored mode: {}", e);
            Mode::default()
        }),
        None => Mode::default(),
    };
    snapshot.insert(MODE_KEY.to_string(), Value::String(mode.as_str().to_string()));

    Tournament::from_snapshot(Some(&Value::Object(snapshot)))
}

/// Remove every key the session uses.
pub fn clear_tournament<S: KeyValueStore + ?Sized>(store: &mut S) -> io::Result<()> {
    for key in [TEAMS_KEY, MODE_KEY, MATCHES_KEY, KNOCKOUT_ROUNDS_KEY] {
        store.remove(key)?;
    }
    Ok(())
}
