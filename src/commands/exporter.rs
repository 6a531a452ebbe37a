// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::migrate;
use crate::models::LedgerDocument;
use crate::store::LedgerStore;
use anyhow::{bail, Result};
use std::path::Path;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap().trim();
            export_transactions(&store.load(), &fmt, Path::new(out))?;
            println!("Exported transactions to {}", out);
        }
        Some(("backup", sub)) => {
            let out = sub.get_one::<String>("out").unwrap().trim();
            let doc = migrate::encode(&store.load())?;
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
            println!("Wrote ledger backup to {}", out);
        }
        _ => {}
    }
    Ok(())
}

/// Writes every transaction in date order as `csv` or `json`.
pub fn export_transactions(doc: &LedgerDocument, fmt: &str, out: &Path) -> Result<()> {
    let mut items: Vec<_> = doc.transactions.iter().collect();
    items.sort_by_key(|t| t.date);

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "type", "category", "description", "amount"])?;
            for t in items {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone().unwrap_or_default(),
                    t.description.clone(),
                    t.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    Ok(())
}
