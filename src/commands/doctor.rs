// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{LedgerDocument, TransactionKind};
use crate::store::LedgerStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// One `[issue, detail]` row per inconsistency found in the document.
pub fn diagnose(doc: &LedgerDocument) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Id collisions within each collection
    let mut check_ids = |kind: &str, ids: Vec<&str>| {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                rows.push(vec![format!("duplicate_{}_id", kind), id.to_string()]);
            }
        }
    };
    for (month, entries) in &doc.income {
        check_ids(
            &format!("income_{}", month),
            entries.iter().map(|e| e.id.as_str()).collect(),
        );
    }
    check_ids("transaction", doc.transactions.iter().map(|t| t.id.as_str()).collect());
    check_ids("goal", doc.goals.iter().map(|g| g.id.as_str()).collect());
    check_ids(
        "template",
        doc.fixed_cost_templates.iter().map(|t| t.id.as_str()).collect(),
    );

    // 2) Spending without category, negative amounts
    for t in &doc.transactions {
        if t.kind == TransactionKind::Spending && t.category.is_none() {
            rows.push(vec!["uncategorized_spending".into(), t.id.clone()]);
        }
        if t.amount < Decimal::ZERO {
            rows.push(vec!["negative_transaction".into(), format!("{} {}", t.id, t.amount)]);
        }
    }
    for (month, limits) in &doc.budgets {
        for (category, limit) in limits {
            if *limit < Decimal::ZERO {
                rows.push(vec!["negative_budget".into(), format!("{} {}", month, category)]);
            }
        }
    }

    // 3) Goals that can never report progress
    for g in &doc.goals {
        if g.target_amount <= Decimal::ZERO {
            rows.push(vec!["goal_without_target".into(), g.id.clone()]);
        }
    }

    // 4) Stored records kept verbatim because they do not decode
    let kept = &doc.unreadable;
    let lists = [
        ("transaction", &kept.transactions),
        ("goal", &kept.goals),
        ("template", &kept.fixed_cost_templates),
    ];
    for (kind, values) in lists {
        for v in values {
            rows.push(vec![format!("unreadable_{}", kind), v.to_string()]);
        }
    }
    for (kind, map) in [("income", &kept.income), ("budget", &kept.budgets)] {
        for (key, v) in map {
            rows.push(vec![format!("unreadable_{}", kind), format!("{} {}", key, v)]);
        }
    }
    rows
}

pub fn handle(store: &LedgerStore) -> Result<()> {
    let rows = diagnose(&store.load());
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
