// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed create/update/delete operations over the ledger document.
//!
//! Each operation is one [`LedgerStore::modify`](crate::store::LedgerStore::modify)
//! cycle. Unknown ids are reported as [`LedgerError::NotFound`] without
//! writing anything; a failed write is [`LedgerError::NotPersisted`].

pub mod budgets;
pub mod goals;
pub mod income;
pub mod templates;
pub mod transactions;

pub use templates::TemplateUpdate;
pub use transactions::{NewTransaction, TransactionUpdate};

use crate::errors::{LedgerError, Result};
use rust_decimal::Decimal;

/// Largest amount any single record accepts (10^15). Keeps month totals far
/// from the limits of `Decimal`.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_000i64)
}

fn ensure_bounded(amount: Decimal) -> Result<()> {
    if amount > max_amount() {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: "exceeds the largest accepted amount",
        });
    }
    Ok(())
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    ensure_bounded(amount)?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn ensure_non_negative(amount: Decimal) -> Result<()> {
    ensure_bounded(amount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::InvalidInput(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn missing(kind: &'static str, id: &str) -> LedgerError {
    tracing::warn!(kind, id, "{} not found", kind);
    LedgerError::not_found(kind, id)
}
