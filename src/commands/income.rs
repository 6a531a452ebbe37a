// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, month_arg, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let source = sub.get_one::<String>("source").map(String::as_str).unwrap_or("");
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let id = store.add_income(month, source, amount)?;
    println!("Income of {} added to {} (id: {})", fmt_money(&amount), month, id);
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let doc = store.load();
    let entries = doc.income_entries(month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        let mut rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| vec![e.id.clone(), e.source.clone(), fmt_money(&e.amount)])
            .collect();
        rows.push(vec![
            String::new(),
            "Total".to_string(),
            fmt_money(&doc.income_total(month)),
        ]);
        println!("{}", pretty_table(&["ID", "Source", "Amount"], rows));
    }
    Ok(())
}

fn remove(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let id = sub.get_one::<String>("id").unwrap().trim();
    store.remove_income(month, id)?;
    println!("Removed income entry {} from {}", id, month);
    Ok(())
}
