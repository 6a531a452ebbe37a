// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repository::TemplateUpdate;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Local;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let id = store.add_template(name, amount)?;
            println!("Added fixed cost '{}' = {} (id: {})", name.trim(), fmt_money(&amount), id);
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let updates = TemplateUpdate {
                name: sub.get_one::<String>("name").cloned(),
                amount: sub
                    .get_one::<String>("amount")
                    .map(|s| parse_decimal(s))
                    .transpose()?,
            };
            store.update_template(id, updates)?;
            println!("Updated fixed cost template {}", id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            store.delete_template(id)?;
            println!("Removed fixed cost template {}", id);
        }
        Some(("list", sub)) => {
            let doc = store.load();
            let templates = doc.templates();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &templates)? {
                let rows = templates
                    .iter()
                    .map(|t| vec![t.id.clone(), t.name.clone(), fmt_money(&t.amount)])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Amount"], rows));
            }
        }
        Some(("record", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => Local::now().date_naive(),
            };
            let tx_id = store.record_fixed_cost(id, date)?;
            println!("Recorded fixed cost {} on {} (transaction {})", id, date, tx_id);
        }
        _ => {}
    }
    Ok(())
}
