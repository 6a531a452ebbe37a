// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Month;
use crate::months::{data_months, month_options};
use crate::store::LedgerStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let doc = store.load();
    let with_data = data_months(&doc);
    let current = Month::current();
    let options = month_options(&doc, store.config(), current);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &options)? {
        let rows = options
            .iter()
            .map(|m| {
                let mut flags = Vec::new();
                if *m == current {
                    flags.push("current");
                }
                if with_data.contains(m) {
                    flags.push("data");
                }
                if *m == store.config().epoch {
                    flags.push("epoch");
                }
                vec![m.to_string(), flags.join(", ")]
            })
            .collect();
        println!("{}", pretty_table(&["Month", ""], rows));
    }
    Ok(())
}
