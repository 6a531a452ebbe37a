// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

pub const DEFAULT_INCOME_SOURCE: &str = "Income";

/// Saturating sum; stored amounts are not bounded, so plain `+` could panic.
pub fn total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

/// Fresh opaque identifier for income entries, transactions, goals and templates.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A calendar month, written `YYYY-MM` everywhere it is persisted or displayed.
///
/// Ordering is chronological, which for four-digit years is also the
/// lexicographic order of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Month> {
        if (0..=9999).contains(&year) && (1..=12).contains(&month) {
            Some(Month { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Month {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Month {
        Month::of(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Calendar predecessor; January rolls back to December of the previous year.
    pub fn previous(self) -> Month {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Month {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Month::of(date) == self
    }

    /// Every day of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.first_day()
            .iter_days()
            .take_while(move |d| self.contains(*d))
    }

    /// Inclusive chronological range `from..=to`; empty when `from > to`.
    pub fn range(from: Month, to: Month) -> Vec<Month> {
        let mut out = Vec::new();
        let mut cur = from;
        while cur <= to {
            out.push(cur);
            cur = cur.next();
        }
        out
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidInput(format!("Invalid month '{}', expected YYYY-MM", s));
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Amounts as JSON numbers. `null` (how `NaN` is written by older clients)
/// and absent values read as zero.
mod amount {
    use rust_decimal::Decimal;
    use serde::Deserializer;

    pub use rust_decimal::serde::float::serialize;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        Ok(rust_decimal::serde::float_option::deserialize(deserializer)?.unwrap_or_default())
    }
}

fn default_income_source() -> String {
    DEFAULT_INCOME_SOURCE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_income_source")]
    pub source: String,
    #[serde(default, with = "amount")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Spending,
    Fixed,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Spending => f.write_str("spending"),
            TransactionKind::Fixed => f.write_str("fixed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    #[serde(default, with = "amount")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, with = "amount")]
    pub target_amount: Decimal,
    #[serde(default, with = "amount")]
    pub current_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedCostTemplate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, with = "amount")]
    pub amount: Decimal,
}

/// Category limits for one month.
pub type MonthBudget = BTreeMap<String, Decimal>;

/// Stored JSON that could not be decoded, kept verbatim so that saving the
/// document writes it back instead of erasing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unreadable {
    pub transactions: Vec<Value>,
    pub goals: Vec<Value>,
    pub fixed_cost_templates: Vec<Value>,
    /// Month key to an array of undecodable entries, or the whole value
    /// when the key itself is not a month.
    pub income: Map<String, Value>,
    /// Month key to an object of undecodable limits, or the whole value
    /// when the key itself is not a month.
    pub budgets: Map<String, Value>,
}

impl Unreadable {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.goals.is_empty()
            && self.fixed_cost_templates.is_empty()
            && self.income.is_empty()
            && self.budgets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
            + self.goals.len()
            + self.fixed_cost_templates.len()
            + self.income.len()
            + self.budgets.len()
    }
}

/// The single persisted value holding every entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDocument {
    pub income: BTreeMap<Month, Vec<IncomeEntry>>,
    pub transactions: Vec<Transaction>,
    #[serde(serialize_with = "serialize_budgets")]
    pub budgets: BTreeMap<Month, MonthBudget>,
    pub goals: Vec<Goal>,
    pub fixed_cost_templates: Vec<FixedCostTemplate>,
    #[serde(skip)]
    pub unreadable: Unreadable,
}

// Limits go to disk as plain JSON numbers, like every other amount.
fn serialize_budgets<S: Serializer>(
    budgets: &BTreeMap<Month, MonthBudget>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(budgets.len()))?;
    for (month, limits) in budgets {
        let limits: BTreeMap<&str, f64> = limits
            .iter()
            .map(|(c, v)| (c.as_str(), v.to_f64().unwrap_or_default()))
            .collect();
        map.serialize_entry(month, &limits)?;
    }
    map.end()
}

impl LedgerDocument {
    /// Empty document carrying the given seed templates.
    pub fn seeded(templates: &[FixedCostTemplate]) -> LedgerDocument {
        LedgerDocument {
            income: BTreeMap::new(),
            transactions: Vec::new(),
            budgets: BTreeMap::new(),
            goals: Vec::new(),
            fixed_cost_templates: templates.to_vec(),
            unreadable: Unreadable::default(),
        }
    }

    pub fn income_entries(&self, month: Month) -> &[IncomeEntry] {
        self.income.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn income_total(&self, month: Month) -> Decimal {
        total(self.income_entries(month).iter().map(|e| e.amount))
    }

    pub fn transactions_in(&self, month: Month) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(move |t| t.month() == month)
    }

    pub fn transactions_on(&self, date: NaiveDate) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(move |t| t.date == date)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn budget(&self, month: Month) -> Option<&MonthBudget> {
        self.budgets.get(&month)
    }

    /// `None` means no budget was ever set, as opposed to an explicit zero.
    pub fn budget_limit(&self, month: Month, category: &str) -> Option<Decimal> {
        self.budget(month).and_then(|b| b.get(category)).copied()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn templates(&self) -> &[FixedCostTemplate] {
        &self.fixed_cost_templates
    }

    pub fn template(&self, id: &str) -> Option<&FixedCostTemplate> {
        self.fixed_cost_templates.iter().find(|t| t.id == id)
    }
}
