//! Durable record of the last applied version per component
//!
//! The version file is a small JSON document, for example
//! `{"database": "1.2.0"}`. It is created with [`INITIAL_VERSION`] on first
//! open and rewritten in full on every [`VersionFile::set`].

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Component key under which the managed store's version is recorded.
pub const DATABASE_COMPONENT: &str = "database";

/// Version recorded for a store that has never been updated.
pub const INITIAL_VERSION: &str = "0.0.0";

/// In-memory view of the version file, persisted on every change.
///
/// Single-writer: no locking is done, so two processes updating the same
/// file race on the read-modify-write.
#[derive(Debug)]
pub struct VersionFile {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl VersionFile {
    /// Open the version file at `path`, creating it with
    /// `{"database": "0.0.0"}` if it does not exist yet.
    pub fn open(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            log::info!(
                "Version file {} not found, creating it at {INITIAL_VERSION}",
                path.display()
            );
            let mut entries = BTreeMap::new();
            entries.insert(DATABASE_COMPONENT.to_string(), INITIAL_VERSION.to_string());
            let file = Self {
                path: path.to_path_buf(),
                entries,
            };
            file.save()?;
        }

        let content = fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)?;

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recorded version for `key`.
    pub fn get(&self, key: &str) -> CoreResult<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CoreError::KeyNotFound {
                key: key.to_string(),
                parent: self.path.display().to_string(),
            })
    }

    /// Record `value` for `key` and rewrite the whole document.
    pub fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Write to a temporary sibling then rename over the target, so readers
    /// never observe a half-written document.
    fn save(&self) -> CoreResult<()> {
        let io_err = |source| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut json = serde_json::to_string_pretty(&self.entries)?;
        json.push('\n');

        let temp_path = temp_path_for(&self.path);
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "version_file_test.rs"]
mod tests;
