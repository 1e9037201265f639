//! Managed store: connection, bootstrap, and updates for one database.

use crate::error::{MigrateError, MigrateResult};
use crate::runner::{MigrationRunner, MigrationStatus, UpdateReport};
use sw_core::{Config, DatabaseSettings};
use sw_db::{Database, DuckDbBackend};

/// One store together with the settings that describe how to migrate it.
///
/// Opening the store bootstraps it from the create script when the marker
/// table is missing.
pub struct ManagedStore<D: Database = DuckDbBackend> {
    db: D,
    settings: DatabaseSettings,
    bootstrapped: bool,
}

impl ManagedStore<DuckDbBackend> {
    /// Open (or create) the DuckDB store named by `settings.path`.
    pub fn open(settings: DatabaseSettings) -> MigrateResult<Self> {
        log::debug!("Opening database {}", settings.path);
        let db = DuckDbBackend::new(&settings.path)?;
        Self::with_backend(db, settings)
    }

    /// Read settings from `config` and open the store.
    pub fn from_config(config: &Config) -> MigrateResult<Self> {
        let settings = DatabaseSettings::from_config(config)?;
        Self::open(settings)
    }
}

impl<D: Database> ManagedStore<D> {
    /// Wrap an existing connection, bootstrapping it if needed.
    pub fn with_backend(db: D, settings: DatabaseSettings) -> MigrateResult<Self> {
        let bootstrapped = if db.table_exists(&settings.marker_table)? {
            false
        } else {
            log::info!(
                "Table '{}' not found, initialising database from {}",
                settings.marker_table,
                settings.create_tables_path.display()
            );
            db.init(&settings.create_tables_path)
                .map_err(|source| MigrateError::Bootstrap {
                    path: settings.create_tables_path.display().to_string(),
                    source,
                })?;
            true
        };

        Ok(Self {
            db,
            settings,
            bootstrapped,
        })
    }

    pub fn db(&self) -> &D {
        &self.db
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// True when opening ran the create script.
    pub fn was_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// A runner bound to this store and its configured directories.
    pub fn runner(&self) -> MigrationRunner<'_> {
        MigrationRunner::from_settings(&self.db, &self.settings)
    }

    /// Bring the store up to the newest update script.
    pub fn update(&self) -> MigrateResult<UpdateReport> {
        self.runner().update()
    }

    pub fn status(&self) -> MigrateResult<MigrationStatus> {
        self.runner().status()
    }
}
