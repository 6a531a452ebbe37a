// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{total, LedgerDocument, Transaction, TransactionKind};
use crate::repository::{NewTransaction, TransactionUpdate};
use crate::store::LedgerStore;
use crate::utils::{
    fmt_money, maybe_print_json, month_arg, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("day", sub)) => day(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn kind_from(s: &str) -> TransactionKind {
    if s == "fixed" {
        TransactionKind::Fixed
    } else {
        TransactionKind::Spending
    }
}

fn add(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = if sub.get_flag("fixed") {
        TransactionKind::Fixed
    } else {
        TransactionKind::Spending
    };
    let id = store.add_transaction(NewTransaction {
        amount,
        date,
        category: sub.get_one::<String>("category").cloned(),
        description: sub.get_one::<String>("description").cloned().unwrap_or_default(),
        kind,
    })?;
    println!("Recorded {} {} on {} (id: {})", kind, fmt_money(&amount), date, id);
    Ok(())
}

fn edit(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let updates = TransactionUpdate {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        kind: sub.get_one::<String>("type").map(|s| kind_from(s)),
    };
    store.edit_transaction(id, updates)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    store.delete_transaction(id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            category: t.category.clone().unwrap_or_default(),
            description: t.description.clone(),
            amount: fmt_money(&t.amount),
        }
    }
}

fn print_rows(sub: &clap::ArgMatches, data: &[TransactionRow]) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount"],
                rows
            )
        );
    }
    Ok(())
}

/// Newest first, filtered by the month, category and limit arguments.
pub fn query_rows(doc: &LedgerDocument, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = month_arg(sub)?;
    let category = sub.get_one::<String>("category");
    let mut items: Vec<&Transaction> = doc
        .transactions_in(month)
        .filter(|t| category.is_none_or(|c| t.category.as_ref() == Some(c)))
        .collect();
    items.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        items.truncate(*limit);
    }
    Ok(items.into_iter().map(TransactionRow::from).collect())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let doc = store.load();
    let data = query_rows(&doc, sub)?;
    print_rows(sub, &data)
}

fn day(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let doc = store.load();
    let data: Vec<TransactionRow> = doc.transactions_on(date).map(TransactionRow::from).collect();
    print_rows(sub, &data)?;
    let total = total(doc.transactions_on(date).map(|t| t.amount));
    if !sub.get_flag("json") && !sub.get_flag("jsonl") {
        println!("Total for {}: {}", date, fmt_money(&total));
    }
    Ok(())
}
