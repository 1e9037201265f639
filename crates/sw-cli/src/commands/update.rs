//! Update command implementation

use anyhow::{bail, Context, Result};
use sw_migrate::UpdateStatus;

use crate::cli::{GlobalArgs, UpdateArgs};
use crate::commands::common::{load_settings, open_store};

/// Execute the update command
pub(crate) fn execute(args: &UpdateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = load_settings(global, args.order)?;
    let store = open_store(settings)?;

    if store.was_bootstrapped() {
        println!(
            "Initialised database from {}",
            store.settings().create_tables_path.display()
        );
    }

    let report = store.update().context("Database update failed")?;

    if global.verbose {
        for version in &report.applied {
            println!("  applied {version}");
        }
    }

    match report.status() {
        UpdateStatus::UpToDate | UpdateStatus::Completed => {
            println!("{report}");
            Ok(())
        }
        UpdateStatus::Halted => bail!("{report}"),
    }
}
