//! sw-core - Core library for Stepwise
//!
//! This crate provides the version value type, the durable version file,
//! and the hierarchical configuration reader shared by all Stepwise
//! components.

pub mod config;
pub mod error;
pub mod version;
pub mod version_file;

pub use config::{Config, DatabaseSettings, ScriptOrder};
pub use error::{CoreError, CoreResult};
pub use version::{Tag, Version};
pub use version_file::{VersionFile, DATABASE_COMPONENT, INITIAL_VERSION};
