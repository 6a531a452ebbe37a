// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store: sole owner of the persisted document.
//!
//! Every mutation is a full load, mutate, save cycle against the storage
//! key. Nothing is cached between calls, so two writers on the same storage
//! simply overwrite each other (last save wins).

use crate::config::LedgerConfig;
use crate::errors::{LedgerError, Result, StorageError};
use crate::migrate;
use crate::models::LedgerDocument;
use crate::storage::KeyValueStore;

pub struct LedgerStore {
    storage: Box<dyn KeyValueStore>,
    config: LedgerConfig,
}

impl LedgerStore {
    pub fn new(storage: impl KeyValueStore + 'static, config: LedgerConfig) -> LedgerStore {
        LedgerStore {
            storage: Box::new(storage),
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Raw persisted text, if any.
    pub fn raw(&self) -> std::result::Result<Option<String>, StorageError> {
        self.storage.get_item(&self.config.storage_key)
    }

    /// Fresh document: seeded templates and nothing else.
    pub fn default_document(&self) -> LedgerDocument {
        LedgerDocument::seeded(&self.config.default_templates)
    }

    /// Reads and migrates the document. Never fails: absent, unreadable or
    /// unparseable data yields the default document.
    pub fn load(&self) -> LedgerDocument {
        let raw = match self.raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.config.storage_key, "No stored ledger, starting fresh");
                return self.default_document();
            }
            Err(err) => {
                tracing::error!(%err, "Error loading data");
                return self.default_document();
            }
        };
        match migrate::decode(&raw, &self.config.default_templates) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::error!(%err, "Stored ledger is not valid JSON, starting fresh");
                self.default_document()
            }
        }
    }

    fn try_save(&self, doc: &LedgerDocument) -> std::result::Result<(), StorageError> {
        let json = serde_json::to_string(&migrate::encode(doc)?)?;
        self.storage.set_item(&self.config.storage_key, &json)?;
        tracing::debug!(bytes = json.len(), "Ledger saved");
        Ok(())
    }

    /// Serializes and persists. `false` means nothing was written.
    pub fn save(&self, doc: &LedgerDocument) -> bool {
        match self.try_save(doc) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%err, "Error saving data");
                false
            }
        }
    }

    /// Load, apply `f`, save.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut LedgerDocument),
    {
        self.modify(|doc| {
            f(doc);
            Ok(())
        })
        .is_ok()
    }

    /// Load, apply `f`, and save only if `f` succeeds. An `Err` from `f`
    /// leaves the stored document untouched.
    pub fn modify<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerDocument) -> Result<T>,
    {
        let mut doc = self.load();
        let out = f(&mut doc)?;
        if self.save(&doc) {
            Ok(out)
        } else {
            Err(LedgerError::NotPersisted)
        }
    }
}
