//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use duckdb::Connection;
use std::path::Path;

/// Path value that selects an in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// DuckDB database backend
///
/// The connection stays in auto-commit mode, so every statement is durable
/// in the write-ahead log as soon as it succeeds. [`Database::commit`]
/// checkpoints that log into the database file.
pub struct DuckDbBackend {
    conn: Connection,
    in_memory: bool,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn,
            in_memory: true,
        })
    }

    /// Create a new DuckDB connection from a file path, creating parent
    /// directories as needed
    pub fn from_path(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbError::ConnectionError(format!("{e}: {}", parent.display()))
            })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn,
            in_memory: false,
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == IN_MEMORY {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Database for DuckDbBackend {
    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn table_exists(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = name.rsplit_once('.').unwrap_or(("main", name));

        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn commit(&self) -> DbResult<()> {
        if self.in_memory {
            return Ok(());
        }
        self.conn
            .execute_batch("CHECKPOINT")
            .map_err(|e| DbError::ExecutionError(format!("checkpoint failed: {e}")))
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
