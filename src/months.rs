// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::LedgerConfig;
use crate::models::{LedgerDocument, Month};
use std::collections::BTreeSet;

/// Months that carry income, transactions or budgets, ascending.
pub fn data_months(doc: &LedgerDocument) -> BTreeSet<Month> {
    let mut months: BTreeSet<Month> = doc.income.keys().copied().collect();
    months.extend(doc.transactions.iter().map(|t| t.month()));
    months.extend(doc.budgets.keys().copied());
    months
}

/// Months present in the data, newest first.
pub fn available_months(doc: &LedgerDocument) -> Vec<Month> {
    data_months(doc).into_iter().rev().collect()
}

/// The configured contiguous range, oldest first, independent of any data.
pub fn preset_months(config: &LedgerConfig) -> Vec<Month> {
    Month::range(config.preset_start, config.preset_end)
}

/// Preset range merged with data months, ascending. Cumulative savings
/// walks this sequence.
pub fn timeline(doc: &LedgerDocument, config: &LedgerConfig) -> BTreeSet<Month> {
    let mut months = data_months(doc);
    months.extend(preset_months(config));
    months
}

/// Choices for a month selector: the timeline plus `current`, newest first.
pub fn month_options(doc: &LedgerDocument, config: &LedgerConfig, current: Month) -> Vec<Month> {
    let mut months = timeline(doc, config);
    months.insert(current);
    months.into_iter().rev().collect()
}
