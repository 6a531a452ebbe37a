// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ensure_positive, missing};
use crate::errors::Result;
use crate::models::{new_id, IncomeEntry, Month, DEFAULT_INCOME_SOURCE};
use crate::store::LedgerStore;
use rust_decimal::Decimal;

impl LedgerStore {
    /// Appends an income entry to `month` and returns its id. A blank
    /// source is recorded as "Income".
    pub fn add_income(&self, month: Month, source: &str, amount: Decimal) -> Result<String> {
        ensure_positive(amount)?;
        let source = match source.trim() {
            "" => DEFAULT_INCOME_SOURCE.to_string(),
            s => s.to_string(),
        };
        let entry = IncomeEntry {
            id: new_id(),
            source,
            amount,
        };
        let id = entry.id.clone();
        self.modify(|doc| {
            doc.income.entry(month).or_default().push(entry);
            Ok(())
        })?;
        tracing::debug!(%month, id = %id, "Income added");
        Ok(id)
    }

    /// Removes one entry; the month bucket disappears with its last entry.
    pub fn remove_income(&self, month: Month, id: &str) -> Result<()> {
        self.modify(|doc| {
            let entries = doc
                .income
                .get_mut(&month)
                .ok_or_else(|| missing("Income entry", id))?;
            let before = entries.len();
            entries.retain(|e| e.id != id);
            if entries.len() == before {
                return Err(missing("Income entry", id));
            }
            if entries.is_empty() {
                doc.income.remove(&month);
            }
            Ok(())
        })
    }
}
