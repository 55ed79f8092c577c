// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{get_currency_symbol, set_currency_symbol};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let data = vec![vec!["currency_symbol".to_string(), get_currency_symbol(conn)?]];
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        Some(("set-currency", sub)) => {
            let symbol = sub.get_one::<String>("symbol").unwrap();
            set_currency_symbol(conn, symbol)?;
            println!("Currency symbol set to {}", symbol.trim());
        }
        _ => {}
    }
    Ok(())
}
