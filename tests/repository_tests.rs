// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::config::LedgerConfig;
use budgetbook::errors::LedgerError;
use budgetbook::models::{Month, TransactionKind};
use budgetbook::repository::{max_amount, NewTransaction, TemplateUpdate, TransactionUpdate};
use budgetbook::storage::MemoryStore;
use budgetbook::store::LedgerStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn store() -> LedgerStore {
    LedgerStore::new(MemoryStore::new(), LedgerConfig::default())
}

fn month(s: &str) -> Month {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn spend(amount: &str, on: &str, category: &str) -> NewTransaction {
    NewTransaction {
        amount: dec(amount),
        date: date(on),
        category: Some(category.to_string()),
        description: String::new(),
        kind: TransactionKind::Spending,
    }
}

#[test]
fn income_add_and_remove_last_entry_drops_month() {
    let store = store();
    let jan = month("2026-01");
    let salary = store.add_income(jan, "Salary", dec("2500")).unwrap();
    let side = store.add_income(jan, "  ", dec("300.25")).unwrap();
    assert_ne!(salary, side);

    let doc = store.load();
    assert_eq!(doc.income_total(jan), dec("2800.25"));
    assert_eq!(doc.income_entries(jan)[1].source, "Income");

    store.remove_income(jan, &salary).unwrap();
    store.remove_income(jan, &side).unwrap();
    assert!(!store.load().income.contains_key(&jan));
}

#[test]
fn removing_unknown_income_is_not_found_and_changes_nothing() {
    let store = store();
    let jan = month("2026-01");
    store.add_income(jan, "Salary", dec("100")).unwrap();
    let before = store.raw().unwrap();

    let err = store.remove_income(jan, "nope").unwrap_err();
    assert!(err.is_not_found());
    let err = store.remove_income(month("2026-02"), "nope").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.raw().unwrap(), before);
}

#[test]
fn income_must_be_positive() {
    let store = store();
    let err = store
        .add_income(month("2026-01"), "Salary", Decimal::ZERO)
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount { .. }));
    assert!(store.raw().unwrap().is_none());
}

#[test]
fn transaction_add_edit_delete() {
    let store = store();
    let id = store
        .add_transaction(spend("42.10", "2026-01-05", "Food"))
        .unwrap();

    store
        .edit_transaction(
            &id,
            TransactionUpdate {
                amount: Some(dec("40")),
                description: Some("Groceries".into()),
                ..TransactionUpdate::default()
            },
        )
        .unwrap();
    let doc = store.load();
    let t = doc.transaction(&id).unwrap();
    assert_eq!(t.amount, dec("40"));
    assert_eq!(t.description, "Groceries");
    assert_eq!(t.category.as_deref(), Some("Food"));
    assert_eq!(t.date, date("2026-01-05"));

    store.delete_transaction(&id).unwrap();
    let after_first = store.raw().unwrap();
    let err = store.delete_transaction(&id).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.raw().unwrap(), after_first);
    assert!(store.load().transactions.is_empty());
}

#[test]
fn spending_requires_a_category() {
    let store = store();
    let mut tx = spend("10", "2026-01-05", "Food");
    tx.category = None;
    assert!(matches!(
        store.add_transaction(tx).unwrap_err(),
        LedgerError::InvalidInput(_)
    ));

    let id = store
        .add_transaction(spend("10", "2026-01-05", "Food"))
        .unwrap();
    let before = store.raw().unwrap();
    let err = store
        .edit_transaction(
            &id,
            TransactionUpdate {
                category: Some("   ".into()),
                ..TransactionUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert_eq!(store.raw().unwrap(), before);
}

#[test]
fn fixed_transactions_may_omit_category() {
    let store = store();
    let id = store
        .add_transaction(NewTransaction {
            amount: dec("80"),
            date: date("2026-01-01"),
            category: None,
            description: "Phone bill".into(),
            kind: TransactionKind::Fixed,
        })
        .unwrap();
    assert_eq!(store.load().transaction(&id).unwrap().kind, TransactionKind::Fixed);
}

#[test]
fn edit_unknown_transaction_is_not_found() {
    let store = store();
    let err = store
        .edit_transaction("missing", TransactionUpdate::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn budget_set_is_an_upsert() {
    let store = store();
    let jan = month("2026-01");
    store.set_budget(jan, "Food", dec("200")).unwrap();
    store.set_budget(jan, "Food", dec("250")).unwrap();
    store.set_budget(jan, "Shopping", Decimal::ZERO).unwrap();

    let doc = store.load();
    assert_eq!(doc.budget(jan).unwrap().len(), 2);
    assert_eq!(doc.budget_limit(jan, "Food"), Some(dec("250")));
    assert_eq!(doc.budget_limit(jan, "Shopping"), Some(Decimal::ZERO));
    assert_eq!(doc.budget_limit(jan, "Other"), None);

    assert!(matches!(
        store.set_budget(jan, "Food", dec("-1")).unwrap_err(),
        LedgerError::InvalidAmount { .. }
    ));
}

#[test]
fn goals_accumulate_contributions() {
    let store = store();
    let id = store.add_goal("Vacation", dec("1000")).unwrap();
    assert_eq!(store.add_to_goal(&id, dec("250")).unwrap(), dec("250"));
    assert_eq!(store.add_to_goal(&id, dec("100.50")).unwrap(), dec("350.50"));
    assert_eq!(store.load().goal(&id).unwrap().current_amount, dec("350.50"));

    assert!(matches!(
        store.add_to_goal(&id, dec("-5")).unwrap_err(),
        LedgerError::InvalidAmount { .. }
    ));
    assert!(store.add_to_goal("ghost", dec("5")).unwrap_err().is_not_found());

    store.delete_goal(&id).unwrap();
    assert!(store.delete_goal(&id).unwrap_err().is_not_found());
}

#[test]
fn goal_needs_name_and_positive_target() {
    let store = store();
    assert!(store.add_goal("", dec("10")).is_err());
    assert!(store.add_goal("Car", Decimal::ZERO).is_err());
    assert!(store.load().goals.is_empty());
}

#[test]
fn templates_update_partially_and_delete() {
    let store = store();
    let id = store.add_template("Rent", dec("900")).unwrap();
    store
        .update_template(
            &id,
            TemplateUpdate {
                amount: Some(dec("950")),
                ..TemplateUpdate::default()
            },
        )
        .unwrap();
    let doc = store.load();
    let t = doc.template(&id).unwrap();
    assert_eq!(t.name, "Rent");
    assert_eq!(t.amount, dec("950"));
    assert_eq!(doc.fixed_cost_templates.len(), 4);

    store.delete_template("2").unwrap();
    assert!(store.load().template("2").is_none());
    assert!(store.delete_template("2").unwrap_err().is_not_found());
    assert!(store
        .update_template("2", TemplateUpdate::default())
        .unwrap_err()
        .is_not_found());
}

#[test]
fn recording_a_template_books_a_fixed_cost() {
    let store = store();
    let tx_id = store.record_fixed_cost("1", date("2026-03-01")).unwrap();
    let doc = store.load();
    let t = doc.transaction(&tx_id).unwrap();
    assert_eq!(t.kind, TransactionKind::Fixed);
    assert_eq!(t.amount, dec("300"));
    assert_eq!(t.description, "Car Payment");
    assert_eq!(t.month(), month("2026-03"));

    assert!(store
        .record_fixed_cost("99", date("2026-03-01"))
        .unwrap_err()
        .is_not_found());
}

#[test]
fn quota_failure_surfaces_as_not_persisted() {
    let config = LedgerConfig::default();
    let seeded = serde_json::to_string(
        &budgetbook::migrate::encode(&budgetbook::models::LedgerDocument::seeded(
            &config.default_templates,
        ))
        .unwrap(),
    )
    .unwrap();
    let store = LedgerStore::new(MemoryStore::with_quota(seeded.len() + 10), config);
    assert!(store.save(&store.default_document()));

    let err = store
        .add_goal("A very long goal name that will not fit", dec("10"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotPersisted));
    assert!(store.load().goals.is_empty());
}

#[test]
fn amounts_above_the_bound_are_rejected() {
    let store = store();
    let jan = month("2026-01");
    let huge = dec("2000000000000000000000000000");
    assert!(matches!(
        store.set_budget(jan, "Food", huge).unwrap_err(),
        LedgerError::InvalidAmount { .. }
    ));
    assert!(store.add_income(jan, "Job", huge).is_err());
    assert!(store.add_transaction(spend("1000000000000000.01", "2026-01-02", "Food")).is_err());
    assert!(store.raw().unwrap().is_none());

    store.set_budget(jan, "Food", max_amount()).unwrap();
    assert_eq!(store.load().budget_limit(jan, "Food"), Some(max_amount()));
}
