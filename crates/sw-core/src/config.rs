//! Configuration loading and dotted-key lookup
//!
//! The configuration file is a JSON document read once at startup. Values
//! are addressed by dotted keys (`database.path`), and string values may
//! reference other keys with `%key%` placeholders:
//!
//! ```json
//! {
//!     "dataDir": "./data",
//!     "versionFile": "%dataDir%/version.json",
//!     "database": { "path": "%dataDir%/server.duckdb" }
//! }
//! ```

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Location of the managed store.
pub const KEY_DATABASE_PATH: &str = "database.path";
/// Bootstrap script run when the marker table is missing.
pub const KEY_CREATE_TABLES_PATH: &str = "database.createTablesPath";
/// Directory holding the update scripts.
pub const KEY_UPDATE_TABLES_FOLDER: &str = "database.updateTablesFolder";
/// Table whose absence means the store has never been bootstrapped.
pub const KEY_MARKER_TABLE: &str = "database.markerTable";
/// `semantic` or `lexicographic` script ordering.
pub const KEY_UPDATE_ORDER: &str = "database.updateOrder";
/// Path of the version-tracking document.
pub const KEY_VERSION_FILE: &str = "versionFile";

const DEFAULT_MARKER_TABLE: &str = "player";

/// Hierarchical configuration backed by a JSON document
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: Value,
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            let absolute = std::path::absolute(path)
                .unwrap_or_else(|_| path.to_path_buf())
                .display()
                .to_string();
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
                absolute,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse configuration from JSON text; `origin` is used in error messages.
    pub fn parse(content: &str, origin: &Path) -> CoreResult<Self> {
        let data: Value =
            serde_json::from_str(content).map_err(|e| CoreError::ConfigParseError {
                path: origin.display().to_string(),
                message: e.to_string(),
            })?;

        if !data.is_object() {
            return Err(CoreError::ConfigParseError {
                path: origin.display().to_string(),
                message: "top-level value must be an object".to_string(),
            });
        }

        Ok(Self {
            path: origin.to_path_buf(),
            data,
        })
    }

    /// Path the configuration was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a dotted key, substituting `%key%` placeholders in strings.
    pub fn get(&self, key: &str) -> CoreResult<Value> {
        let mut resolving = Vec::new();
        self.resolve(key, &mut resolving)
    }

    /// Look up a dotted key and render it as a string.
    ///
    /// Numbers and booleans are rendered with their JSON spelling; objects,
    /// arrays and null are rejected.
    pub fn get_str(&self, key: &str) -> CoreResult<String> {
        let value = self.get(key)?;
        scalar_to_string(&value).ok_or_else(|| CoreError::ConfigInvalid {
            message: format!("'{key}' must be a string, found {value}"),
        })
    }

    /// Like [`get_str`](Self::get_str) but `None` when the key is absent.
    pub fn get_str_opt(&self, key: &str) -> CoreResult<Option<String>> {
        match self.get_str(key) {
            Ok(value) => Ok(Some(value)),
            Err(CoreError::KeyNotFound { .. }) if self.lookup(key).is_err() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check whether a key resolves
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// All leaf values keyed by their dotted path (placeholders unresolved).
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        let mut out = BTreeMap::new();
        flatten_into(&self.data, String::new(), &mut out);
        out
    }

    /// Walk a dotted key through nested objects without substitution.
    fn lookup(&self, key: &str) -> CoreResult<&Value> {
        let mut current = &self.data;
        let mut walked: Vec<&str> = Vec::new();

        for segment in key.split('.') {
            current = current
                .as_object()
                .and_then(|obj| obj.get(segment))
                .ok_or_else(|| CoreError::KeyNotFound {
                    key: segment.to_string(),
                    parent: if walked.is_empty() {
                        self.path.display().to_string()
                    } else {
                        walked.join(".")
                    },
                })?;
            walked.push(segment);
        }

        Ok(current)
    }

    fn resolve(&self, key: &str, resolving: &mut Vec<String>) -> CoreResult<Value> {
        if resolving.iter().any(|k| k == key) {
            resolving.push(key.to_string());
            return Err(CoreError::PlaceholderCycle {
                key: resolving[0].clone(),
                chain: resolving.join(" -> "),
            });
        }

        let value = self.lookup(key)?;
        let Some(text) = value.as_str().filter(|s| s.contains('%')) else {
            return Ok(value.clone());
        };

        resolving.push(key.to_string());
        let substituted = self.substitute(key, text, resolving)?;
        resolving.pop();

        Ok(Value::String(substituted))
    }

    fn substitute(&self, key: &str, text: &str, resolving: &mut Vec<String>) -> CoreResult<String> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('%').ok_or_else(|| CoreError::InvalidPlaceholder {
                key: key.to_string(),
                value: text.to_string(),
            })?;

            let reference = &after[..end];
            if self.lookup(reference).is_err() {
                return Err(CoreError::KeyNotFound {
                    key: reference.to_string(),
                    parent: key.to_string(),
                });
            }
            let value = self.resolve(reference, resolving)?;
            match scalar_to_string(&value) {
                Some(s) => out.push_str(&s),
                None => {
                    return Err(CoreError::ConfigInvalid {
                        message: format!(
                            "placeholder '%{reference}%' in '{key}' must refer to a scalar value"
                        ),
                    })
                }
            }

            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flatten_into(value: &Value, prefix: String, out: &mut BTreeMap<String, Value>) {
    match value.as_object() {
        Some(obj) => {
            for (k, v) in obj {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_into(v, key, out);
            }
        }
        None => {
            out.insert(prefix, value.clone());
        }
    }
}

/// How update scripts are ordered before the skip/apply phases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptOrder {
    /// Sort by parsed version precedence (`1.2.0` before `1.10.0`)
    #[default]
    Semantic,
    /// Sort by filename stem as a plain string (`1.10.0` before `1.2.0`)
    Lexicographic,
}

impl fmt::Display for ScriptOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptOrder::Semantic => write!(f, "semantic"),
            ScriptOrder::Lexicographic => write!(f, "lexicographic"),
        }
    }
}

impl FromStr for ScriptOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "semantic" => Ok(ScriptOrder::Semantic),
            "lexicographic" => Ok(ScriptOrder::Lexicographic),
            other => Err(CoreError::ConfigInvalid {
                message: format!(
                    "unknown update order '{other}', expected 'semantic' or 'lexicographic'"
                ),
            }),
        }
    }
}

/// Settings the migration engine reads from the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSettings {
    /// Store location (`:memory:` for an in-memory store)
    pub path: String,

    /// Bootstrap script
    pub create_tables_path: PathBuf,

    /// Update-script directory
    pub update_tables_folder: PathBuf,

    /// Version-tracking document
    pub version_file: PathBuf,

    /// Table checked to decide whether to bootstrap
    pub marker_table: String,

    /// Ordering applied to the update directory listing
    pub update_order: ScriptOrder,
}

impl DatabaseSettings {
    /// Read all migration settings, failing on the first missing required key.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let marker_table = config
            .get_str_opt(KEY_MARKER_TABLE)?
            .unwrap_or_else(|| DEFAULT_MARKER_TABLE.to_string());
        let update_order = match config.get_str_opt(KEY_UPDATE_ORDER)? {
            Some(order) => order.parse()?,
            None => ScriptOrder::default(),
        };

        Ok(Self {
            path: config.get_str(KEY_DATABASE_PATH)?,
            create_tables_path: PathBuf::from(config.get_str(KEY_CREATE_TABLES_PATH)?),
            update_tables_folder: PathBuf::from(config.get_str(KEY_UPDATE_TABLES_FOLDER)?),
            version_file: PathBuf::from(config.get_str(KEY_VERSION_FILE)?),
            marker_table,
            update_order,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
