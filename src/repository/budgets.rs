// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ensure_non_negative, required};
use crate::errors::Result;
use crate::models::Month;
use crate::store::LedgerStore;
use rust_decimal::Decimal;

impl LedgerStore {
    /// Upserts the limit for `category` in `month`. There is no delete:
    /// a zero limit is the only way to clear one.
    pub fn set_budget(&self, month: Month, category: &str, amount: Decimal) -> Result<()> {
        ensure_non_negative(amount)?;
        let category = required(category, "Category")?;
        self.modify(|doc| {
            doc.budgets
                .entry(month)
                .or_default()
                .insert(category, amount);
            Ok(())
        })
    }
}
