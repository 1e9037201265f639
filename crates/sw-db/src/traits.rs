//! Database trait definition

use crate::error::{DbError, DbResult};
use std::path::Path;

/// Connection the migration engine drives.
///
/// Calls are synchronous and blocking; one caller owns the connection for
/// the duration of a migration run.
pub trait Database {
    /// Execute one or more SQL statements.
    ///
    /// Stops at the first failing statement. Statements that ran before it
    /// are not rolled back here.
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table exists (`schema.table` or `table` in the default schema)
    fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Make all work so far durable
    fn commit(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Read a SQL script from disk and execute it.
    fn run_script(&self, path: &Path) -> DbResult<()> {
        let sql = std::fs::read_to_string(path).map_err(|source| DbError::ScriptReadError {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Running SQL script {} ({} bytes)", path.display(), sql.len());
        self.execute_batch(&sql)
    }

    /// Bootstrap an empty store from its create script, then commit.
    fn init(&self, create_script: &Path) -> DbResult<()> {
        self.run_script(create_script)?;
        self.commit()
    }
}
