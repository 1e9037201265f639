//! Update runner: applies pending scripts in order, at most once each.
//!
//! A run moves through `INIT -> SCANNING -> APPLYING* -> DONE`. The version
//! file is rewritten after every attempted script, whether it succeeded or
//! not, so a failed script is never retried automatically. The first failure
//! stops the loop; work done so far is still committed.

use crate::error::MigrateResult;
use crate::script::{discover_scripts, skip_applied, UpdateScript};
use std::fmt;
use std::path::PathBuf;
use sw_core::{DatabaseSettings, ScriptOrder, Version, VersionFile, DATABASE_COMPONENT};
use sw_db::Database;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// No script was newer than the recorded version
    UpToDate,
    /// Every pending script was applied
    Completed,
    /// A script failed and the remaining ones were not attempted
    Halted,
}

/// A script that raised an error while being applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    /// Version of the failing script
    pub version: String,

    /// Path of the failing script
    pub script: PathBuf,

    /// 1-based position among the scripts pending at the start of the run
    pub position: usize,

    /// Error message from the connection
    pub message: String,
}

/// Outcome of [`MigrationRunner::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Version recorded before the run
    pub from_version: String,

    /// Version recorded after the run (the last attempted script)
    pub to_version: String,

    /// Number of scripts pending at the start of the run
    pub total: usize,

    /// Versions applied successfully, in order
    pub applied: Vec<String>,

    /// The script that stopped the run, if any
    pub failure: Option<ScriptFailure>,
}

impl UpdateReport {
    fn up_to_date(version: &str) -> Self {
        Self {
            from_version: version.to_string(),
            to_version: version.to_string(),
            total: 0,
            applied: Vec::new(),
            failure: None,
        }
    }

    pub fn status(&self) -> UpdateStatus {
        if self.failure.is_some() {
            UpdateStatus::Halted
        } else if self.total == 0 {
            UpdateStatus::UpToDate
        } else {
            UpdateStatus::Completed
        }
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    /// True when the run reached the end of the script list
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None if self.total == 0 => {
                write!(f, "Database is already up to date ({})", self.to_version)
            }
            None => write!(
                f,
                "{} update{} applied ({} -> {})",
                self.applied.len(),
                if self.applied.len() == 1 { "" } else { "s" },
                self.from_version,
                self.to_version
            ),
            Some(failure) => write!(
                f,
                "Update {} of {} failed ({}): {}",
                failure.position, self.total, failure.version, failure.message
            ),
        }
    }
}

/// Recorded version and the scripts an update would attempt
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    pub current_version: String,
    pub pending: Vec<UpdateScript>,
}

impl MigrationStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Applies update scripts from one directory to one store.
///
/// Construct one runner per store and pass it to callers explicitly. The
/// runner assumes it is the only writer of the version file and the store
/// for the duration of [`update`](Self::update).
pub struct MigrationRunner<'a> {
    db: &'a dyn Database,
    update_dir: PathBuf,
    version_file: PathBuf,
    order: ScriptOrder,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(
        db: &'a dyn Database,
        update_dir: impl Into<PathBuf>,
        version_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db,
            update_dir: update_dir.into(),
            version_file: version_file.into(),
            order: ScriptOrder::default(),
        }
    }

    /// Build a runner from configuration settings.
    pub fn from_settings(db: &'a dyn Database, settings: &DatabaseSettings) -> Self {
        Self::new(
            db,
            settings.update_tables_folder.clone(),
            settings.version_file.clone(),
        )
        .with_order(settings.update_order)
    }

    /// Override how the directory listing is sorted.
    pub fn with_order(mut self, order: ScriptOrder) -> Self {
        self.order = order;
        self
    }

    /// Report the recorded version and pending scripts without applying
    /// anything.
    pub fn status(&self) -> MigrateResult<MigrationStatus> {
        let (_, current, pending) = self.scan()?;
        Ok(MigrationStatus {
            current_version: current.to_string(),
            pending,
        })
    }

    /// Apply every pending script in order.
    ///
    /// Returns `Err` only for failures that happen before any script runs
    /// (missing directory, bad filenames, unreadable version file) or when
    /// the version file or final commit cannot be written. A failing script
    /// is reported through [`UpdateReport::failure`].
    pub fn update(&self) -> MigrateResult<UpdateReport> {
        let (mut version_file, current, pending) = self.scan()?;

        if pending.is_empty() {
            log::info!("Database is already up to date ({current})");
            return Ok(UpdateReport::up_to_date(current.as_str()));
        }

        log::info!(
            "Updates to apply: {}",
            pending
                .iter()
                .map(|s| s.file_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let total = pending.len();
        let mut report = UpdateReport {
            from_version: current.to_string(),
            to_version: current.to_string(),
            total,
            applied: Vec::with_capacity(total),
            failure: None,
        };

        for (index, script) in pending.iter().enumerate() {
            log::info!(
                "Applying update {}/{}: {}",
                index + 1,
                total,
                script.file_name
            );

            let outcome = self.db.run_script(&script.path);

            // Record the attempt before looking at the outcome. Work already
            // done is committed even when the record cannot be written.
            if let Err(e) = version_file.set(DATABASE_COMPONENT, script.version.as_str()) {
                self.db.commit()?;
                return Err(e.into());
            }
            report.to_version = script.version.to_string();

            match outcome {
                Ok(()) => report.applied.push(script.version.to_string()),
                Err(e) => {
                    log::error!("Error while applying update {}: {e}", script.file_name);
                    report.failure = Some(ScriptFailure {
                        version: script.version.to_string(),
                        script: script.path.clone(),
                        position: index + 1,
                        message: e.to_string(),
                    });
                    break;
                }
            }
        }

        self.db.commit()?;

        log::info!("{report}");
        Ok(report)
    }

    /// INIT and SCANNING: open the version file, list and filter scripts.
    fn scan(&self) -> MigrateResult<(VersionFile, Version, Vec<UpdateScript>)> {
        let scripts = discover_scripts(&self.update_dir, self.order)?;

        let version_file = VersionFile::open(&self.version_file)?;
        let current = Version::parse(version_file.get(DATABASE_COMPONENT)?)?;
        log::debug!(
            "Recorded {} version {current}, {} script(s) in {}",
            self.db.db_type(),
            scripts.len(),
            self.update_dir.display()
        );

        let pending = skip_applied(scripts, &current);
        Ok((version_file, current, pending))
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
