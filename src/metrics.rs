// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures over a loaded document. Nothing here mutates or persists.
//!
//! Cumulative savings start at the configured epoch and are carried forward
//! month by month. The running total is floored at zero after every month,
//! so a loss month can wipe out earlier surplus but never leaves a debt to
//! be paid back by later months.

use crate::config::LedgerConfig;
use crate::models::{total, LedgerDocument, Month, TransactionKind};
use crate::months;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Share of the limit, in percent, from which spending is flagged.
pub const WARNING_THRESHOLD_PERCENT: i64 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    NoBudget,
    Over,
    AtLimit,
    Warning,
    Under,
}

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetStatus::NoBudget => "no-budget",
            BudgetStatus::Over => "over",
            BudgetStatus::AtLimit => "at-limit",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Under => "under",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    /// Capped at 100; `current` itself is not.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSavings {
    pub month: Month,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub category: String,
    /// Zero when no limit is set.
    #[serde(with = "rust_decimal::serde::float")]
    pub budget: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySpending {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpending {
    pub days: Vec<DaySpending>,
    /// Largest single-day total, zero for an empty month.
    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: Month,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub spending: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fixed_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub carryover: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cumulative: Decimal,
}

fn warning_ratio() -> Decimal {
    Decimal::from(WARNING_THRESHOLD_PERCENT) / Decimal::ONE_HUNDRED
}

fn floor_zero(v: Decimal) -> Decimal {
    v.max(Decimal::ZERO)
}

pub struct Metrics<'a> {
    doc: &'a LedgerDocument,
    config: &'a LedgerConfig,
}

impl<'a> Metrics<'a> {
    pub fn new(doc: &'a LedgerDocument, config: &'a LedgerConfig) -> Metrics<'a> {
        Metrics { doc, config }
    }

    fn sum_kind(&self, month: Month, kind: TransactionKind) -> Decimal {
        total(
            self.doc
                .transactions_in(month)
                .filter(|t| t.kind == kind)
                .map(|t| t.amount),
        )
    }

    pub fn category_spending(&self, month: Month, category: &str) -> Decimal {
        total(
            self.doc
                .transactions_in(month)
                .filter(|t| t.kind == TransactionKind::Spending)
                .filter(|t| t.category.as_deref() == Some(category))
                .map(|t| t.amount),
        )
    }

    pub fn total_spending(&self, month: Month) -> Decimal {
        self.sum_kind(month, TransactionKind::Spending)
    }

    pub fn total_fixed_costs(&self, month: Month) -> Decimal {
        self.sum_kind(month, TransactionKind::Fixed)
    }

    /// Limit minus spending, an unset limit counting as zero.
    pub fn remaining_budget(&self, month: Month, category: &str) -> Decimal {
        let limit = self.doc.budget_limit(month, category).unwrap_or_default();
        limit.saturating_sub(self.category_spending(month, category))
    }

    /// A zero limit reads as `NoBudget` whether it was set explicitly or not;
    /// use [`LedgerDocument::budget_limit`] to tell the two apart.
    pub fn budget_status(&self, month: Month, category: &str) -> BudgetStatus {
        let limit = self.doc.budget_limit(month, category).unwrap_or_default();
        let spent = self.category_spending(month, category);
        if limit.is_zero() {
            BudgetStatus::NoBudget
        } else if spent > limit {
            BudgetStatus::Over
        } else if spent == limit {
            BudgetStatus::AtLimit
        } else if spent.checked_div(limit).is_some_and(|ratio| ratio >= warning_ratio()) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Under
        }
    }

    /// Income minus spending minus fixed costs, this month only.
    pub fn monthly_savings(&self, month: Month) -> Decimal {
        self.doc
            .income_total(month)
            .saturating_sub(self.total_spending(month))
            .saturating_sub(self.total_fixed_costs(month))
    }

    // Single pass over the document; months without data are absent (zero).
    fn savings_by_month(&self) -> BTreeMap<Month, Decimal> {
        let mut out: BTreeMap<Month, Decimal> = BTreeMap::new();
        for (month, entries) in &self.doc.income {
            let slot = out.entry(*month).or_default();
            *slot = slot.saturating_add(total(entries.iter().map(|e| e.amount)));
        }
        for t in &self.doc.transactions {
            let slot = out.entry(t.month()).or_default();
            *slot = slot.saturating_sub(t.amount);
        }
        out
    }

    /// Savings accumulated from the epoch through `month`, floored at zero
    /// after every month. Months outside the timeline, before the epoch, or
    /// a timeline lacking the epoch fall back to this month's own savings,
    /// floored at zero.
    pub fn cumulative_savings(&self, month: Month) -> Decimal {
        let epoch = self.config.epoch;
        if month == epoch {
            return floor_zero(self.monthly_savings(epoch));
        }
        let timeline = months::timeline(self.doc, self.config);
        if month < epoch || !timeline.contains(&month) || !timeline.contains(&epoch) {
            return floor_zero(self.monthly_savings(month));
        }
        let savings = self.savings_by_month();
        timeline.range(epoch..=month).fold(Decimal::ZERO, |running, m| {
            floor_zero(running.saturating_add(savings.get(m).copied().unwrap_or_default()))
        })
    }

    /// What `month` inherits from the months before it; zero at the epoch.
    pub fn carryover_savings(&self, month: Month) -> Decimal {
        if month == self.config.epoch {
            return Decimal::ZERO;
        }
        floor_zero(self.cumulative_savings(month.previous()))
    }

    pub fn goal_progress(&self, id: &str) -> Option<GoalProgress> {
        let goal = self.doc.goal(id)?;
        let percentage = if goal.target_amount > Decimal::ZERO {
            // A quotient too large to represent is far past the target.
            match goal.current_amount.checked_div(goal.target_amount) {
                Some(ratio) if ratio < Decimal::ONE => ratio * Decimal::ONE_HUNDRED,
                _ => Decimal::ONE_HUNDRED,
            }
        } else {
            Decimal::ZERO
        };
        Some(GoalProgress {
            current: goal.current_amount,
            target: goal.target_amount,
            percentage,
        })
    }

    /// Cumulative savings for every month with data, oldest first.
    pub fn all_time_savings(&self) -> Vec<MonthSavings> {
        months::data_months(self.doc)
            .into_iter()
            .map(|month| MonthSavings {
                month,
                savings: self.cumulative_savings(month),
            })
            .collect()
    }

    /// Spending per configured category, in configuration order.
    pub fn spending_breakdown(&self, month: Month) -> Vec<CategorySpending> {
        self.config
            .categories
            .iter()
            .map(|category| CategorySpending {
                category: category.clone(),
                spent: self.category_spending(month, category),
            })
            .collect()
    }

    pub fn budget_vs_spending(&self, month: Month) -> Vec<BudgetComparison> {
        self.config
            .categories
            .iter()
            .map(|category| BudgetComparison {
                category: category.clone(),
                budget: self.doc.budget_limit(month, category).unwrap_or_default(),
                spent: self.category_spending(month, category),
                remaining: self.remaining_budget(month, category),
                status: self.budget_status(month, category),
            })
            .collect()
    }

    /// Totals of all transactions per calendar day of `month`.
    pub fn daily_spending(&self, month: Month) -> DailySpending {
        let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for t in self.doc.transactions_in(month) {
            let slot = totals.entry(t.date).or_default();
            *slot = slot.saturating_add(t.amount);
        }
        let days: Vec<DaySpending> = month
            .days()
            .map(|date| DaySpending {
                date,
                total: totals.get(&date).copied().unwrap_or_default(),
            })
            .collect();
        let max = days.iter().map(|d| d.total).max().unwrap_or_default();
        DailySpending {
            days,
            max: floor_zero(max),
        }
    }

    pub fn month_summary(&self, month: Month) -> MonthSummary {
        MonthSummary {
            month,
            income: self.doc.income_total(month),
            spending: self.total_spending(month),
            fixed_costs: self.total_fixed_costs(month),
            savings: self.monthly_savings(month),
            carryover: self.carryover_savings(month),
            cumulative: self.cumulative_savings(month),
        }
    }
}
