// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::{FixedCostTemplate, Month};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_STORAGE_KEY: &str = "financeAppData";

/// Adjustable constants of the ledger: storage key, savings epoch,
/// the preset month range and the presentation category set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub storage_key: String,
    /// First month of cumulative savings accumulation.
    pub epoch: Month,
    pub preset_start: Month,
    pub preset_end: Month,
    pub categories: Vec<String>,
    pub default_templates: Vec<FixedCostTemplate>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let epoch = Month::new(2025, 12).unwrap_or_else(Month::current);
        let template = |id: &str, name: &str, amount: i64| FixedCostTemplate {
            id: id.to_string(),
            name: name.to_string(),
            amount: Decimal::from(amount),
        };
        LedgerConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            epoch,
            preset_start: epoch,
            preset_end: Month::new(2026, 12).unwrap_or(epoch),
            categories: vec!["Shopping".into(), "Food".into(), "Other".into()],
            default_templates: vec![
                template("1", "Car Payment", 300),
                template("2", "Gas", 150),
                template("3", "Phone bill", 80),
            ],
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(LedgerError::Config("storage_key must not be empty".into()));
        }
        if self.preset_start > self.preset_end {
            return Err(LedgerError::Config(format!(
                "preset_start {} is after preset_end {}",
                self.preset_start, self.preset_end
            )));
        }
        if self.categories.is_empty() {
            return Err(LedgerError::Config("at least one category is required".into()));
        }
        Ok(())
    }
}

/// Reads a TOML config file. A missing file yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LedgerConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::debug!("No config at {:?}, using defaults", path_ref);
        return Ok(LedgerConfig::default());
    }
    tracing::debug!("Loading configuration from: {:?}", path_ref);
    let contents = fs::read_to_string(path_ref).map_err(|e| {
        LedgerError::Config(format!("Failed to read config file {:?}: {}", path_ref, e))
    })?;
    let config: LedgerConfig = toml::from_str(&contents).map_err(|e| {
        LedgerError::Config(format!(
            "Failed to parse TOML from config file {:?}: {}",
            path_ref, e
        ))
    })?;
    config.validate()?;
    Ok(config)
}
