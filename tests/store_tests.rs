// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::config::{LedgerConfig, DEFAULT_STORAGE_KEY};
use budgetbook::errors::LedgerError;
use budgetbook::models::Month;
use budgetbook::storage::{MemoryStore, SqliteStore};
use budgetbook::store::LedgerStore;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn month(s: &str) -> Month {
    s.parse().unwrap()
}

fn store_with(raw: &str) -> LedgerStore {
    let storage = MemoryStore::new().with_item(DEFAULT_STORAGE_KEY, raw);
    LedgerStore::new(storage, LedgerConfig::default())
}

#[test]
fn absent_document_loads_seeded_default() {
    let store = LedgerStore::new(MemoryStore::new(), LedgerConfig::default());
    let doc = store.load();
    assert!(doc.income.is_empty());
    assert!(doc.transactions.is_empty());
    assert!(doc.budgets.is_empty());
    assert!(doc.goals.is_empty());
    let names: Vec<&str> = doc.fixed_cost_templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Car Payment", "Gas", "Phone bill"]);
    let ids: Vec<&str> = doc.fixed_cost_templates.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn unparseable_document_falls_back_to_default() {
    let store = store_with("{not json");
    assert_eq!(store.load(), store.default_document());
}

#[test]
fn legacy_numeric_income_becomes_single_entry() {
    let store = store_with(r#"{"income":{"2024-01":500}}"#);
    let doc = store.load();
    let entries = doc.income_entries(month("2024-01"));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, "Income");
    assert_eq!(entries[0].amount, Decimal::from(500));
    assert!(!entries[0].id.is_empty());
    assert_eq!(doc.income_total(month("2024-01")), Decimal::from(500));
    // templates were missing entirely, so the seeds apply
    assert_eq!(doc.fixed_cost_templates.len(), 3);
}

#[test]
fn malformed_income_is_reset_and_entries_get_ids() {
    let store = store_with(
        r#"{"income":{
            "2024-02":"lots",
            "2024-03":[{"source":"Job","amount":10},{"id":"keep","source":"Gift","amount":5}]
        }}"#,
    );
    let doc = store.load();
    assert!(!doc.income.contains_key(&month("2024-02")));
    let entries = doc.income_entries(month("2024-03"));
    assert_eq!(entries.len(), 2);
    assert!(!entries[0].id.is_empty());
    assert_eq!(entries[1].id, "keep");
    assert_eq!(doc.income_total(month("2024-03")), Decimal::from(15));
}

#[test]
fn templates_without_ids_get_sequential_ids() {
    let store = store_with(
        r#"{"fixedCostTemplates":[
            {"name":"Rent","amount":1000},
            {"id":"x","name":"Gym","amount":30},
            {"name":"Net","amount":50}
        ]}"#,
    );
    let ids: Vec<String> = store
        .load()
        .fixed_cost_templates
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["1", "x", "3"]);
}

#[test]
fn malformed_records_are_set_aside_not_fatal() {
    let store = store_with(
        r#"{
            "transactions":[
                {"id":"a","amount":12.5,"date":"2026-01-04","category":"Food","description":"","type":"spending"},
                {"id":"b","amount":3,"date":"someday"}
            ],
            "budgets":{"2026-01":{"Food":200,"Other":"n/a"},"bad-key":{"Food":1}}
        }"#,
    );
    let doc = store.load();
    assert_eq!(doc.transactions.len(), 1);
    assert_eq!(doc.transactions[0].id, "a");
    assert_eq!(doc.budget_limit(month("2026-01"), "Food"), Some(Decimal::from(200)));
    assert_eq!(doc.budget_limit(month("2026-01"), "Other"), None);
    assert_eq!(doc.budgets.len(), 1);
    assert_eq!(doc.unreadable.transactions.len(), 1);
    assert!(doc.unreadable.budgets.contains_key("bad-key"));
}

#[test]
fn null_amounts_read_as_zero_and_survive_other_writes() {
    let store = store_with(
        r#"{
            "income":{"2025-11":[{"id":"i1","source":"Job","amount":null}]},
            "goals":[{"id":"g1","name":"Trip","targetAmount":1000,"currentAmount":null}],
            "fixedCostTemplates":[{"id":"1","name":"Gym","amount":null}],
            "budgets":{"2025-11":{"Food":null}}
        }"#,
    );
    let doc = store.load();
    assert_eq!(doc.goal("g1").unwrap().current_amount, Decimal::ZERO);
    assert_eq!(doc.income_entries(month("2025-11")).len(), 1);
    assert_eq!(doc.template("1").unwrap().amount, Decimal::ZERO);
    assert_eq!(doc.budget_limit(month("2025-11"), "Food"), Some(Decimal::ZERO));

    store
        .add_income(month("2026-01"), "Job", Decimal::from(10))
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&store.raw().unwrap().unwrap()).unwrap();
    assert_eq!(v["goals"].as_array().unwrap().len(), 1);
    assert_eq!(v["goals"][0]["id"], "g1");
    assert_eq!(v["income"]["2025-11"][0]["id"], "i1");
    assert_eq!(v["fixedCostTemplates"][0]["name"], "Gym");
}

#[test]
fn undecodable_records_are_written_back_unchanged() {
    let store = store_with(
        r#"{
            "income":{
                "2026-01":[{"id":"ok","source":"Job","amount":5},{"id":"bad","amount":"five"}],
                "someday":[{"id":"x","amount":1}]
            },
            "transactions":[
                {"id":"t1","amount":12,"date":"2026-01-04","category":"Food","type":"spending"},
                {"id":"t2","amount":3,"date":"someday"}
            ],
            "goals":[{"id":"g2","targetAmount":10}],
            "fixedCostTemplates":[{"id":"1","name":"Rent","amount":900},{"id":"2","name":"Gym","amount":"lots"}],
            "budgets":{"2026-01":{"Food":200,"Other":"n/a"},"bad-key":{"Food":1}}
        }"#,
    );
    store
        .set_budget(month("2026-02"), "Food", Decimal::from(50))
        .unwrap();

    let v: serde_json::Value = serde_json::from_str(&store.raw().unwrap().unwrap()).unwrap();
    let tx_ids: Vec<&str> = v["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(tx_ids, ["t1", "t2"]);
    assert_eq!(v["transactions"][1]["date"], "someday");
    assert_eq!(v["goals"][0]["id"], "g2");
    assert_eq!(v["fixedCostTemplates"][1]["amount"], "lots");
    assert_eq!(v["income"]["2026-01"][1]["id"], "bad");
    assert_eq!(v["income"]["someday"][0]["id"], "x");
    assert_eq!(v["budgets"]["2026-01"]["Other"], "n/a");
    assert_eq!(v["budgets"]["bad-key"]["Food"], serde_json::json!(1));
    assert_eq!(v["budgets"]["2026-02"]["Food"], serde_json::json!(50.0));

    // a second round trip changes nothing
    let saved = store.raw().unwrap().unwrap();
    let doc = store.load();
    assert_eq!(doc.transactions.len(), 1);
    assert!(store.save(&doc));
    assert_eq!(store.raw().unwrap().unwrap(), saved);
}

#[test]
fn wrong_typed_collection_resets_only_that_field() {
    let store = store_with(
        r#"{
            "transactions":{},
            "goals":[{"id":"g1","name":"Trip","targetAmount":10}],
            "income":{"2026-01":[{"id":"i","source":"Job","amount":5}]},
            "budgets":null
        }"#,
    );
    let doc = store.load();
    assert!(doc.transactions.is_empty());
    assert!(doc.budgets.is_empty());
    assert_eq!(doc.goals.len(), 1);
    assert_eq!(doc.income_total(month("2026-01")), Decimal::from(5));
    assert_eq!(doc.fixed_cost_templates.len(), 3);
}

#[test]
fn non_object_document_falls_back_to_default() {
    let store = store_with("[1, 2, 3]");
    assert_eq!(store.load(), store.default_document());
}

#[test]
fn migration_is_idempotent() {
    let store = store_with(
        r#"{"income":{"2024-01":500,"2024-02":[{"source":"Job","amount":1200.75}]},
            "transactions":[{"id":"t1","amount":79.99,"date":"2024-01-15","category":"Food","description":"Lunch","type":"spending"}],
            "budgets":{"2024-01":{"Food":250.5}},
            "goals":[{"id":"g1","name":"Trip","targetAmount":1000,"currentAmount":125}],
            "fixedCostTemplates":[{"name":"Rent","amount":900}]}"#,
    );
    let first = store.load();
    assert!(store.save(&first));
    let saved = store.raw().unwrap().unwrap();

    let second = store.load();
    assert_eq!(first, second);
    assert!(store.save(&second));
    assert_eq!(store.raw().unwrap().unwrap(), saved);
}

#[test]
fn persisted_shape_uses_plain_numbers() {
    let store = LedgerStore::new(MemoryStore::new(), LedgerConfig::default());
    store
        .add_income(month("2026-01"), "Salary", Decimal::from_str_exact("1200.5").unwrap())
        .unwrap();
    store
        .set_budget(month("2026-01"), "Food", Decimal::from(300))
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&store.raw().unwrap().unwrap()).unwrap();
    assert_eq!(v["income"]["2026-01"][0]["amount"], serde_json::json!(1200.5));
    assert_eq!(v["income"]["2026-01"][0]["source"], "Salary");
    assert_eq!(v["budgets"]["2026-01"]["Food"], serde_json::json!(300.0));
    assert_eq!(v["fixedCostTemplates"][0]["name"], "Car Payment");
    assert!(v["transactions"].as_array().unwrap().is_empty());
}

#[test]
fn failed_write_reports_false_and_keeps_nothing() {
    let store = LedgerStore::new(MemoryStore::with_quota(16), LedgerConfig::default());
    let doc = store.load();
    assert!(!store.save(&doc));
    assert!(!store.update(|d| d.goals.clear()));

    let err = store
        .add_income(month("2026-01"), "Job", Decimal::from(10))
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotPersisted));
    assert!(store.raw().unwrap().is_none());
}

#[test]
fn update_applies_closure_and_persists() {
    let store = LedgerStore::new(MemoryStore::new(), LedgerConfig::default());
    assert!(store.update(|d| d.fixed_cost_templates.clear()));
    assert!(store.load().fixed_cost_templates.is_empty());
}

#[test]
fn custom_storage_key_is_honoured() {
    let config = LedgerConfig {
        storage_key: "otherKey".into(),
        ..LedgerConfig::default()
    };
    let storage = MemoryStore::new().with_item(DEFAULT_STORAGE_KEY, r#"{"income":{"2024-01":5}}"#);
    let store = LedgerStore::new(storage, config);
    assert!(store.load().income.is_empty());
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let store = LedgerStore::new(SqliteStore::open(&path).unwrap(), LedgerConfig::default());
        store
            .add_goal("Emergency fund", Decimal::from(5000))
            .unwrap();
    }
    let store = LedgerStore::new(SqliteStore::open(&path).unwrap(), LedgerConfig::default());
    let doc = store.load();
    assert_eq!(doc.goals.len(), 1);
    assert_eq!(doc.goals[0].name, "Emergency fund");
}

#[test]
fn last_save_wins_between_writers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let tab_a = LedgerStore::new(SqliteStore::open(&path).unwrap(), LedgerConfig::default());
    let tab_b = LedgerStore::new(SqliteStore::open(&path).unwrap(), LedgerConfig::default());

    let stale = tab_a.load();
    tab_b
        .add_income(month("2026-02"), "Bonus", Decimal::from(100))
        .unwrap();
    assert!(tab_a.save(&stale));

    assert!(tab_b.load().income.is_empty());
}

#[test]
fn in_memory_sqlite_round_trip() {
    let store = LedgerStore::new(SqliteStore::open_in_memory().unwrap(), LedgerConfig::default());
    assert!(store.raw().unwrap().is_none());
    let doc = store.load();
    assert!(store.save(&doc));
    assert_eq!(store.load(), doc);
}
