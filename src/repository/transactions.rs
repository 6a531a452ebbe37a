// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ensure_non_negative, missing};
use crate::errors::{LedgerError, Result};
use crate::models::{new_id, Transaction, TransactionKind};
use crate::store::LedgerStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub description: String,
    pub kind: TransactionKind,
}

/// Fields to overwrite on an existing transaction; `None` keeps the old value.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub kind: Option<TransactionKind>,
}

fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

fn validate(t: &Transaction) -> Result<()> {
    ensure_non_negative(t.amount)?;
    if t.kind == TransactionKind::Spending && t.category.is_none() {
        return Err(LedgerError::InvalidInput(
            "Spending transactions need a category".into(),
        ));
    }
    Ok(())
}

impl LedgerStore {
    pub fn add_transaction(&self, new: NewTransaction) -> Result<String> {
        let transaction = Transaction {
            id: new_id(),
            amount: new.amount,
            date: new.date,
            category: normalize_category(new.category.as_deref()),
            description: new.description.trim().to_string(),
            kind: new.kind,
        };
        validate(&transaction)?;
        let id = transaction.id.clone();
        self.modify(|doc| {
            doc.transactions.push(transaction);
            Ok(())
        })?;
        tracing::debug!(id = %id, "Transaction added");
        Ok(id)
    }

    /// Merges `updates` into the transaction with `id`.
    pub fn edit_transaction(&self, id: &str, updates: TransactionUpdate) -> Result<()> {
        self.modify(|doc| {
            let slot = doc
                .transactions
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| missing("Transaction", id))?;
            let mut edited = slot.clone();
            if let Some(amount) = updates.amount {
                edited.amount = amount;
            }
            if let Some(date) = updates.date {
                edited.date = date;
            }
            if let Some(category) = updates.category.as_deref() {
                edited.category = normalize_category(Some(category));
            }
            if let Some(description) = updates.description {
                edited.description = description.trim().to_string();
            }
            if let Some(kind) = updates.kind {
                edited.kind = kind;
            }
            validate(&edited)?;
            *slot = edited;
            Ok(())
        })
    }

    pub fn delete_transaction(&self, id: &str) -> Result<()> {
        self.modify(|doc| {
            let before = doc.transactions.len();
            doc.transactions.retain(|t| t.id != id);
            if doc.transactions.len() == before {
                return Err(missing("Transaction", id));
            }
            Ok(())
        })
    }

    /// Books a template as a `fixed` transaction on `date`, named after the
    /// template.
    pub fn record_fixed_cost(&self, template_id: &str, date: NaiveDate) -> Result<String> {
        let doc = self.load();
        let template = doc
            .template(template_id)
            .ok_or_else(|| missing("Fixed cost template", template_id))?;
        self.add_transaction(NewTransaction {
            amount: template.amount,
            date,
            category: Some(template.name.clone()),
            description: template.name.clone(),
            kind: TransactionKind::Fixed,
        })
    }
}
