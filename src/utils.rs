// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinanceError, FinanceResult};
use crate::models::validate_amount;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::invalid(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Parses `YYYY-MM` into `(month, year)`.
pub fn parse_month(s: &str) -> FinanceResult<(u32, i32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| FinanceError::invalid(format!("Invalid month '{}', expected YYYY-MM", s)))?;
    Ok((d.month(), d.year()))
}

pub fn parse_decimal(s: &str) -> FinanceResult<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| FinanceError::invalid(format!("Invalid amount '{}'", s)))
}

/// An amount typed by the user: must parse and be strictly positive.
pub fn parse_amount(s: &str) -> FinanceResult<Decimal> {
    let amount = parse_decimal(s)?;
    validate_amount(amount)?;
    Ok(amount)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line.
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
