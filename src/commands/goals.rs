// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::Metrics;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            let id = store.add_goal(name, target)?;
            println!("Added goal '{}' with target {} (id: {})", name.trim(), fmt_money(&target), id);
        }
        Some(("fund", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let current = store.add_to_goal(id, amount)?;
            println!("Added {} to goal {}, now at {}", fmt_money(&amount), id, fmt_money(&current));
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            store.delete_goal(id)?;
            println!("Removed goal {}", id);
        }
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    id: String,
    name: String,
    current: String,
    target: String,
    percentage: String,
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let doc = store.load();
    let metrics = Metrics::new(&doc, store.config());
    let data: Vec<GoalRow> = doc
        .goals()
        .iter()
        .filter_map(|g| {
            let progress = metrics.goal_progress(&g.id)?;
            Some(GoalRow {
                id: g.id.clone(),
                name: g.name.clone(),
                current: fmt_money(&progress.current),
                target: fmt_money(&progress.target),
                percentage: format!("{:.1}%", progress.percentage.round_dp(1)),
            })
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.id, r.name, r.current, r.target, r.percentage])
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Goal", "Saved", "Target", "Progress"], rows)
        );
    }
    Ok(())
}
