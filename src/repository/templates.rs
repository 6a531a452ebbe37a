// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ensure_non_negative, missing, required};
use crate::errors::Result;
use crate::models::{new_id, FixedCostTemplate};
use crate::store::LedgerStore;
use rust_decimal::Decimal;

/// Partial update of a fixed-cost template; `None` fields are kept.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
}

impl LedgerStore {
    pub fn add_template(&self, name: &str, amount: Decimal) -> Result<String> {
        ensure_non_negative(amount)?;
        let template = FixedCostTemplate {
            id: new_id(),
            name: required(name, "Template name")?,
            amount,
        };
        let id = template.id.clone();
        self.modify(|doc| {
            doc.fixed_cost_templates.push(template);
            Ok(())
        })?;
        Ok(id)
    }

    pub fn update_template(&self, id: &str, updates: TemplateUpdate) -> Result<()> {
        let name = updates
            .name
            .as_deref()
            .map(|n| required(n, "Template name"))
            .transpose()?;
        if let Some(amount) = updates.amount {
            ensure_non_negative(amount)?;
        }
        self.modify(|doc| {
            let template = doc
                .fixed_cost_templates
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| missing("Fixed cost template", id))?;
            if let Some(name) = name {
                template.name = name;
            }
            if let Some(amount) = updates.amount {
                template.amount = amount;
            }
            Ok(())
        })
    }

    pub fn delete_template(&self, id: &str) -> Result<()> {
        self.modify(|doc| {
            let before = doc.fixed_cost_templates.len();
            doc.fixed_cost_templates.retain(|t| t.id != id);
            if doc.fixed_cost_templates.len() == before {
                return Err(missing("Fixed cost template", id));
            }
            Ok(())
        })
    }
}
