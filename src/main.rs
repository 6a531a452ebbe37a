// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use budgetbook::{cli, commands, config, storage, store::LedgerStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config_path = match matches.get_one::<String>("config") {
        Some(p) => PathBuf::from(p),
        None => storage::config_path()?,
    };
    let config = config::load_config(&config_path)?;
    let db_path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => storage::db_path()?,
    };
    let store = LedgerStore::new(storage::SqliteStore::open(&db_path)?, config);

    match matches.subcommand() {
        Some(("init", _)) => {
            let doc = store.load();
            if !store.save(&doc) {
                anyhow::bail!("Could not write ledger to {}", db_path.display());
            }
            println!("Ledger initialized at {}", db_path.display());
        }
        Some(("months", sub)) => commands::months::handle(&store, sub)?,
        Some(("income", sub)) => commands::income::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&store, sub)?,
        Some(("fixed", sub)) => commands::templates::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
