// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Decoding of persisted documents, including every shape older versions wrote.
//!
//! Income values were once a bare number per month; they are decoded through
//! [`LegacyIncomeValue`] and upgraded to entry lists here, exactly once, so the
//! rest of the crate only sees [`LedgerDocument`]. Records that no longer
//! decode are set aside in [`Unreadable`] with a warning and written back
//! unchanged by [`encode`], so a load followed by a save never loses them.

use crate::models::{
    new_id, FixedCostTemplate, Goal, IncomeEntry, LedgerDocument, Month, MonthBudget, Transaction,
    Unreadable, DEFAULT_INCOME_SOURCE,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Income value for one month as it may appear on disk.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LegacyIncomeValue {
    Amount(f64),
    Entries(Vec<Value>),
    Other(Value),
}

/// Parses and migrates a raw document. `Err` means the text is not a
/// JSON object at all; the caller falls back to a fresh one.
pub fn decode(
    raw: &str,
    default_templates: &[FixedCostTemplate],
) -> serde_json::Result<LedgerDocument> {
    let root: Map<String, Value> = serde_json::from_str(raw)?;
    Ok(migrate(root, default_templates))
}

/// Takes one top-level collection. `null` counts as absent; any other value
/// of the wrong JSON type is reset with a warning, leaving the other
/// collections alone.
fn field<T: DeserializeOwned>(root: &mut Map<String, Value>, key: &str) -> Option<T> {
    match root.remove(key)? {
        Value::Null => None,
        value => match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(key, %err, "Resetting top-level field with unexpected shape");
                None
            }
        },
    }
}

fn migrate(mut root: Map<String, Value>, default_templates: &[FixedCostTemplate]) -> LedgerDocument {
    let mut unreadable = Unreadable::default();

    let mut income = BTreeMap::new();
    let raw_income: Map<String, Value> = field(&mut root, "income").unwrap_or_default();
    for (key, value) in raw_income {
        let Some(month) = parse_month_key(&key, "income") else {
            unreadable.income.insert(key, value);
            continue;
        };
        let value = match serde_json::from_value::<LegacyIncomeValue>(value) {
            Ok(value) => value,
            Err(_) => continue,
        };
        let (entries, rejected) = migrate_income(&key, value);
        if !rejected.is_empty() {
            unreadable.income.insert(key, Value::Array(rejected));
        }
        // A month without entries is stored as an absent key.
        if !entries.is_empty() {
            income.insert(month, entries);
        }
    }

    let (mut transactions, rejected) = decode_items::<Transaction>(
        field(&mut root, "transactions").unwrap_or_default(),
        "transaction",
    );
    unreadable.transactions = rejected;
    for t in transactions.iter_mut().filter(|t| t.id.is_empty()) {
        t.id = new_id();
    }

    let (mut goals, rejected) =
        decode_items::<Goal>(field(&mut root, "goals").unwrap_or_default(), "goal");
    unreadable.goals = rejected;
    for g in goals.iter_mut().filter(|g| g.id.is_empty()) {
        g.id = new_id();
    }

    let mut fixed_cost_templates = match field::<Vec<Value>>(&mut root, "fixedCostTemplates") {
        Some(values) => {
            let (templates, rejected) = decode_items(values, "fixed cost template");
            unreadable.fixed_cost_templates = rejected;
            templates
        }
        None => default_templates.to_vec(),
    };
    for (index, template) in fixed_cost_templates.iter_mut().enumerate() {
        if template.id.is_empty() {
            template.id = (index + 1).to_string();
        }
    }

    let mut budgets = BTreeMap::new();
    let raw_budgets: Map<String, Value> = field(&mut root, "budgets").unwrap_or_default();
    for (key, value) in raw_budgets {
        let Some(month) = parse_month_key(&key, "budget") else {
            unreadable.budgets.insert(key, value);
            continue;
        };
        let (limits, rejected) = migrate_budget(&key, value);
        if !rejected.is_empty() {
            unreadable.budgets.insert(key, Value::Object(rejected));
        }
        budgets.insert(month, limits);
    }

    if !unreadable.is_empty() {
        tracing::warn!(
            records = unreadable.len(),
            "Keeping undecodable records as stored"
        );
    }

    LedgerDocument {
        income,
        transactions,
        budgets,
        goals,
        fixed_cost_templates,
        unreadable,
    }
}

/// Upgrades one month's income value to a list of entries with ids, plus the
/// entries that could not be decoded.
fn migrate_income(month: &str, value: LegacyIncomeValue) -> (Vec<IncomeEntry>, Vec<Value>) {
    match value {
        LegacyIncomeValue::Amount(amount) => match Decimal::try_from(amount) {
            Ok(amount) => (
                vec![IncomeEntry {
                    id: new_id(),
                    source: DEFAULT_INCOME_SOURCE.to_string(),
                    amount,
                }],
                Vec::new(),
            ),
            Err(_) => {
                tracing::warn!(month, amount, "Keeping unrepresentable legacy income amount");
                (Vec::new(), vec![Value::from(amount)])
            }
        },
        LegacyIncomeValue::Entries(values) => {
            let (mut entries, rejected): (Vec<IncomeEntry>, _) =
                decode_items(values, "income entry");
            for e in entries.iter_mut().filter(|e| e.id.is_empty()) {
                e.id = new_id();
            }
            (entries, rejected)
        }
        LegacyIncomeValue::Other(other) => {
            tracing::warn!(month, value = %other, "Resetting income with unexpected shape");
            (Vec::new(), Vec::new())
        }
    }
}

fn migrate_budget(month: &str, value: Value) -> (MonthBudget, Map<String, Value>) {
    let Value::Object(limits) = value else {
        tracing::warn!(month, "Dropping budget with unexpected shape");
        return (MonthBudget::new(), Map::new());
    };
    let mut budget = MonthBudget::new();
    let mut rejected = Map::new();
    for (category, limit) in limits {
        if limit.is_null() {
            budget.insert(category, Decimal::ZERO);
            continue;
        }
        match serde_json::from_value::<Decimal>(limit.clone()) {
            Ok(limit) => {
                budget.insert(category, limit);
            }
            Err(err) => {
                tracing::warn!(month, category = %category, %err, "Keeping malformed budget limit as stored");
                rejected.insert(category, limit);
            }
        }
    }
    (budget, rejected)
}

fn parse_month_key(key: &str, what: &str) -> Option<Month> {
    match key.parse() {
        Ok(month) => Some(month),
        Err(_) => {
            tracing::warn!(key, what, "Keeping entry under malformed month key as stored");
            None
        }
    }
}

fn decode_items<T: DeserializeOwned>(values: Vec<Value>, what: &str) -> (Vec<T>, Vec<Value>) {
    let mut items = Vec::new();
    let mut rejected = Vec::new();
    for value in values {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(item) => items.push(item),
            Err(err) => {
                tracing::warn!(what, %err, "Keeping malformed record as stored");
                rejected.push(value);
            }
        }
    }
    (items, rejected)
}

/// The persisted form of `doc`: its typed content plus every undecodable
/// record it was loaded with.
pub fn encode(doc: &LedgerDocument) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(doc)?;
    let Some(root) = value.as_object_mut() else {
        return Ok(value);
    };
    let kept = &doc.unreadable;
    append(root, "transactions", &kept.transactions);
    append(root, "goals", &kept.goals);
    append(root, "fixedCostTemplates", &kept.fixed_cost_templates);
    merge(root, "income", &kept.income);
    merge(root, "budgets", &kept.budgets);
    Ok(value)
}

fn append(root: &mut Map<String, Value>, key: &str, kept: &[Value]) {
    if let Some(Value::Array(items)) = root.get_mut(key) {
        items.extend(kept.iter().cloned());
    }
}

// Arrays are extended and objects gain the missing keys; typed data wins.
fn merge(root: &mut Map<String, Value>, key: &str, kept: &Map<String, Value>) {
    let Some(Value::Object(target)) = root.get_mut(key) else {
        return;
    };
    for (k, v) in kept {
        match (target.get_mut(k), v) {
            (Some(Value::Array(items)), Value::Array(extra)) => items.extend(extra.iter().cloned()),
            (Some(Value::Object(limits)), Value::Object(extra)) => {
                for (category, limit) in extra {
                    limits.entry(category.clone()).or_insert_with(|| limit.clone());
                }
            }
            (Some(_), _) => {}
            (None, _) => {
                target.insert(k.clone(), v.clone());
            }
        }
    }
}
