//! Update-script discovery and ordering

use crate::error::{MigrateError, MigrateResult};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use sw_core::{ScriptOrder, Version};

/// One update script, named `<version><extension>`
#[derive(Debug, Clone)]
pub struct UpdateScript {
    /// Version parsed from the filename stem
    pub version: Version,

    /// Full path to the script
    pub path: PathBuf,

    /// Filename as listed in the directory
    pub file_name: String,
}

impl UpdateScript {
    /// Build a script entry from a path whose stem is a version string
    pub fn from_path(path: &Path) -> MigrateResult<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let version = Version::parse(stem).map_err(|source| MigrateError::InvalidScriptName {
            file: file_name.clone(),
            source,
        })?;

        Ok(Self {
            version,
            path: path.to_path_buf(),
            file_name,
        })
    }
}

/// List every update script in `dir`, sorted by `order`.
///
/// Subdirectories and dotfiles are ignored. Any other file must be named
/// after a version, and two files may not carry the same version string.
pub fn discover_scripts(dir: &Path, order: ScriptOrder) -> MigrateResult<Vec<UpdateScript>> {
    if !dir.is_dir() {
        return Err(MigrateError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let read_err = |source| MigrateError::ReadDir {
        path: dir.display().to_string(),
        source,
    };

    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() {
            continue;
        }
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            log::debug!("Ignoring hidden file {}", path.display());
            continue;
        }
        scripts.push(UpdateScript::from_path(&path)?);
    }

    sort_scripts(&mut scripts, order);

    let mut seen = std::collections::HashMap::new();
    for script in &scripts {
        if let Some(first) = seen.insert(script.version.as_str(), script.file_name.as_str()) {
            return Err(MigrateError::DuplicateVersion {
                version: script.version.to_string(),
                first: first.to_string(),
                second: script.file_name.clone(),
            });
        }
    }

    Ok(scripts)
}

/// Sort scripts in place. Ties fall back to the filename.
pub fn sort_scripts(scripts: &mut [UpdateScript], order: ScriptOrder) {
    scripts.sort_by(|a, b| compare(a, b, order).then_with(|| a.file_name.cmp(&b.file_name)));
}

fn compare(a: &UpdateScript, b: &UpdateScript, order: ScriptOrder) -> Ordering {
    match order {
        ScriptOrder::Semantic => a.version.precedence(&b.version),
        ScriptOrder::Lexicographic => a.version.as_str().cmp(b.version.as_str()),
    }
}

/// Drop scripts from the front of a sorted list while they are at or below
/// `current`. "At" means the exact same version string; a different
/// spelling of equal precedence (`01.0.0` against `1.0.0`) is still pending.
///
/// Only the head is inspected: with lexicographic ordering a lower version
/// that sorts after a higher one is kept.
pub fn skip_applied(scripts: Vec<UpdateScript>, current: &Version) -> Vec<UpdateScript> {
    let applied = scripts
        .iter()
        .take_while(|s| s.version.precedence(current) == Ordering::Less || s.version == *current)
        .count();
    scripts.into_iter().skip(applied).collect()
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
