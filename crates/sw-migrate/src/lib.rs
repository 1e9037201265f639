//! Versioned schema migrations for Stepwise.
//!
//! Brings a store from its recorded version up to the newest update script
//! in a directory. Each script is attempted at most once, in ascending
//! version order, and the version file is rewritten after every attempt so
//! an interrupted run resumes where it stopped.

pub mod error;
pub mod runner;
pub mod script;
pub mod store;

pub use error::{MigrateError, MigrateResult};
pub use runner::{MigrationRunner, MigrationStatus, ScriptFailure, UpdateReport, UpdateStatus};
pub use script::UpdateScript;
pub use store::ManagedStore;
