// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::Metrics;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, month_arg, pretty_table};
use anyhow::Result;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("savings", sub)) => savings(store, sub)?,
        Some(("breakdown", sub)) => breakdown(store, sub)?,
        Some(("calendar", sub)) => calendar(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let doc = store.load();
    let s = Metrics::new(&doc, store.config()).month_summary(month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&s.income)],
            vec!["Spending".to_string(), fmt_money(&s.spending)],
            vec!["Fixed costs".to_string(), fmt_money(&s.fixed_costs)],
            vec!["Savings".to_string(), fmt_money(&s.savings)],
            vec!["Carryover".to_string(), fmt_money(&s.carryover)],
            vec!["Cumulative savings".to_string(), fmt_money(&s.cumulative)],
        ];
        println!("{}", pretty_table(&[&month.to_string(), "Amount"], rows));
    }
    Ok(())
}

fn savings(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let doc = store.load();
    let metrics = Metrics::new(&doc, store.config());
    let data = metrics.all_time_savings();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.month.to_string(),
                    fmt_money(&metrics.monthly_savings(r.month)),
                    fmt_money(&r.savings),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Monthly", "Cumulative"], rows)
        );
    }
    Ok(())
}

fn breakdown(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let doc = store.load();
    let data = Metrics::new(&doc, store.config()).spending_breakdown(month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| vec![r.category.clone(), fmt_money(&r.spent)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn calendar(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let doc = store.load();
    let data = Metrics::new(&doc, store.config()).daily_spending(month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .days
            .iter()
            .filter(|d| !d.total.is_zero())
            .map(|d| {
                let weekday = d.date.format("%a").to_string();
                vec![d.date.to_string(), weekday, fmt_money(&d.total)]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Day", "Total"], rows));
        println!("Busiest day: {}", fmt_money(&data.max));
    }
    Ok(())
}
