// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Kind;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let kinds = match m.get_one::<String>("kind") {
        Some(k) => vec![Kind::parse(k)?],
        None => vec![Kind::Income, Kind::Expense],
    };
    let mut data = Vec::new();
    for kind in kinds {
        for c in kind.categories() {
            data.push(vec![kind.to_string(), c.to_string()]);
        }
    }
    println!("{}", pretty_table(&["Kind", "Category"], data));
    Ok(())
}
