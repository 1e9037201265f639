//! Error types for the migration engine.

use sw_core::CoreError;
use sw_db::DbError;
use thiserror::Error;

/// Migration errors.
///
/// A failing update script is not an error here: the runner records it in
/// its [`UpdateReport`](crate::UpdateReport). These variants abort a run.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The update-script directory does not exist (M001).
    #[error("[M001] Update directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// The update-script directory could not be listed (M002).
    #[error("[M002] Failed to read update directory '{path}': {source}")]
    ReadDir {
        path: String,
        source: std::io::Error,
    },

    /// A script filename does not parse as a version (M003).
    #[error("[M003] Update script '{file}' is not named after a version: {source}")]
    InvalidScriptName {
        file: String,
        #[source]
        source: CoreError,
    },

    /// Two scripts carry the same version (M004).
    #[error("[M004] Duplicate update scripts for version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: String,
        first: String,
        second: String,
    },

    /// The bootstrap script failed on an empty store (M005).
    #[error("[M005] Bootstrap from '{path}' failed: {source}")]
    Bootstrap {
        path: String,
        #[source]
        source: DbError,
    },

    /// Configuration or version file error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Connection error outside script application (open, commit).
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
