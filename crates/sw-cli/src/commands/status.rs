//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sw_core::DatabaseSettings;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{load_settings, open_store};

/// JSON shape of `sw status --json`
#[derive(Debug, Serialize)]
struct StatusOutput<'a> {
    current_version: String,
    up_to_date: bool,
    pending: Vec<&'a str>,
    settings: &'a DatabaseSettings,
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global, args.order)?;
    let store = open_store(settings)?;

    let status = store.status().context("Failed to read update status")?;

    if args.json {
        let output = StatusOutput {
            current_version: status.current_version.clone(),
            up_to_date: status.is_up_to_date(),
            pending: status.pending.iter().map(|s| s.file_name.as_str()).collect(),
            settings: store.settings(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Recorded version: {}", status.current_version);
    if status.is_up_to_date() {
        println!("Database is already up to date");
        return Ok(());
    }

    println!("Pending updates ({}):", status.pending.len());
    for script in &status.pending {
        println!("  {}", script.file_name);
    }
    Ok(())
}
