//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sw_core::{Config, DatabaseSettings, ScriptOrder};
use sw_migrate::ManagedStore;

use crate::cli::{GlobalArgs, OrderArg};

/// Install the stderr logger. `RUST_LOG` takes precedence over `--verbose`.
pub(crate) fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Load the configuration file and resolve database settings from it.
pub(crate) fn load_settings(
    global: &GlobalArgs,
    order: Option<OrderArg>,
) -> Result<DatabaseSettings> {
    let config = Config::load(&global.config)
        .with_context(|| format!("Failed to load config from {}", global.config.display()))?;
    let mut settings =
        DatabaseSettings::from_config(&config).context("Invalid database settings")?;

    if let Some(order) = order {
        settings.update_order = ScriptOrder::from(order);
    }
    log::debug!(
        "Database {} with updates from {} ({} order)",
        settings.path,
        settings.update_tables_folder.display(),
        settings.update_order
    );
    Ok(settings)
}

/// Open the configured store, bootstrapping it on first use.
pub(crate) fn open_store(settings: DatabaseSettings) -> Result<ManagedStore> {
    let path = settings.path.clone();
    ManagedStore::open(settings).with_context(|| format!("Failed to open database {path}"))
}
