// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ensure_positive, missing, required};
use crate::errors::{LedgerError, Result};
use crate::models::{new_id, Goal};
use crate::store::LedgerStore;
use rust_decimal::Decimal;

impl LedgerStore {
    pub fn add_goal(&self, name: &str, target_amount: Decimal) -> Result<String> {
        ensure_positive(target_amount)?;
        let goal = Goal {
            id: new_id(),
            name: required(name, "Goal name")?,
            target_amount,
            current_amount: Decimal::ZERO,
        };
        let id = goal.id.clone();
        self.modify(|doc| {
            doc.goals.push(goal);
            Ok(())
        })?;
        Ok(id)
    }

    /// Adds a contribution. The stored amount is never capped at the target.
    pub fn add_to_goal(&self, id: &str, amount: Decimal) -> Result<Decimal> {
        ensure_positive(amount)?;
        self.modify(|doc| {
            let goal = doc
                .goals
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or_else(|| missing("Goal", id))?;
            goal.current_amount = goal.current_amount.checked_add(amount).ok_or(
                LedgerError::InvalidAmount {
                    amount,
                    reason: "would overflow the goal's saved amount",
                },
            )?;
            Ok(goal.current_amount)
        })
    }

    pub fn delete_goal(&self, id: &str) -> Result<()> {
        self.modify(|doc| {
            let before = doc.goals.len();
            doc.goals.retain(|g| g.id != id);
            if doc.goals.len() == before {
                return Err(missing("Goal", id));
            }
            Ok(())
        })
    }
}
