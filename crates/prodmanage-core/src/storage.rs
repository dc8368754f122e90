//! Persistent key-value storage for the session.
//!
//! Stands in for browser local storage: a flat JSON object of string values in
//! `<home>/storage.json`, written with restricted permissions (0600).
//! Values are never logged.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::paths;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "jwt_token";
/// Key holding the JSON-serialized session user.
pub const USER_KEY: &str = "user";

/// String key-value store, optionally backed by a file.
#[derive(Debug, Default, Clone)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStorage {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at the default path under the ProdManage home.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn open_default() -> Result<Self> {
        Self::open(&paths::storage_path())
    }

    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. A file that is not a JSON object
    /// of strings is treated as empty and replaced on the next write.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read storage from {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "discarding unreadable storage file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets `key` and persists.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.to_string(), value.into());
        self.save()
    }

    /// Sets several keys with a single write.
    ///
    /// Either every key is stored or, when the write fails, none of them is
    /// left behind, in memory or on disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn set_all(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        let previous: Vec<_> = pairs
            .iter()
            .map(|(key, value)| {
                (*key, self.entries.insert((*key).to_string(), value.clone()))
            })
            .collect();

        let saved = self.save();
        if saved.is_err() {
            for (key, old) in previous {
                match old {
                    Some(old) => self.entries.insert(key.to_string(), old),
                    None => self.entries.remove(key),
                };
            }
        }
        saved
    }

    /// Removes several keys with a single write.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        let mut changed = false;
        for key in keys {
            changed |= self.entries.remove(*key).is_some();
        }
        if changed {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize storage")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        Ok(())
    }
}
