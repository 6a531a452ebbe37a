// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::Metrics;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, month_arg, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("status", sub)) => status(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let cat = sub.get_one::<String>("category").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    store.set_budget(month, cat, amount)?;
    println!("Budget set for {} / {} = {}", month, cat, fmt_money(&amount));
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let doc = store.load();
    let budget = doc.budget(month).cloned().unwrap_or_default();
    let data: Vec<Vec<String>> = budget
        .iter()
        .map(|(c, a)| vec![month.to_string(), c.clone(), fmt_money(a)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Category", "Budget"], data));
    }
    Ok(())
}

fn status(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let doc = store.load();
    let metrics = Metrics::new(&doc, store.config());
    let data = metrics.budget_vs_spending(month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                // An explicit zero limit is shown as set, an absent one as "-".
                let budget = match doc.budget_limit(month, &r.category) {
                    Some(limit) => fmt_money(&limit),
                    None => "-".to_string(),
                };
                vec![
                    r.category.clone(),
                    budget,
                    fmt_money(&r.spent),
                    fmt_money(&r.remaining),
                    r.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Budget", "Spent", "Remaining", "Status"],
                rows
            )
        );
    }
    Ok(())
}
