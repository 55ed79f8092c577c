// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Guest mode: entries are read from a CSV into a session-local store and
//! summarised through the same engine as persisted data. Nothing is saved.

use super::reports::{compute_breakdown, compute_summary, print_breakdown, print_summary};
use crate::models::{GUEST_OWNER_ID, Kind, NewTransaction, User};
use crate::report::render_bar_chart;
use crate::store::{GuestStore, RecordStore};
use crate::utils::{maybe_print_json, parse_amount, parse_date};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Serialize;
use std::path::Path;

pub fn handle(symbol: &str, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("file").unwrap().trim();
    let store = load_csv(Path::new(path))?;
    let guest = User::guest();
    let month = m.get_one::<String>("month");

    let summary = compute_summary(&store, &guest, month)?;
    let incomes = compute_breakdown(&store, &guest, Kind::Income, month)?;
    let expenses = compute_breakdown(&store, &guest, Kind::Expense, month)?;

    #[derive(Serialize)]
    struct GuestReport<'a> {
        summary: &'a super::reports::SummaryView,
        incomes: &'a [super::reports::BreakdownRow],
        expenses: &'a [super::reports::BreakdownRow],
    }
    let out = GuestReport {
        summary: &summary,
        incomes: &incomes,
        expenses: &expenses,
    };
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &out)? {
        println!("Guest mode: {} entries loaded, nothing is saved", store.len());
        print_summary(&summary, symbol);
        print_breakdown(Kind::Income, &incomes, symbol);
        print_breakdown(Kind::Expense, &expenses, symbol);
        print!(
            "{}",
            render_bar_chart(summary.total_income, summary.total_expenses, symbol, 40)
        );
    }
    Ok(())
}

/// Reads `kind,category,amount,date,notes` rows. Any invalid row aborts the
/// whole load with the offending line number.
pub fn load_csv(path: &Path) -> Result<GuestStore> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let mut store = GuestStore::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result?;
        let kind_raw = rec.get(0).context("kind missing")?;
        let category_raw = rec.get(1).context("category missing")?;
        let amount_raw = rec.get(2).context("amount missing")?;
        let date_raw = rec.get(3).context("date missing")?;
        let notes = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let kind = Kind::parse(kind_raw).with_context(|| format!("line {}", line))?;
        let category = kind
            .canonical_category(category_raw)
            .with_context(|| format!("line {}", line))?;
        let amount = parse_amount(amount_raw).with_context(|| format!("line {}", line))?;
        let date = parse_date(date_raw).with_context(|| format!("line {}", line))?;

        let new = NewTransaction::new(GUEST_OWNER_ID, kind, category, amount, date, notes)?;
        store.insert(&new)?;
    }
    tracing::debug!(count = store.len(), path = %path.display(), "guest CSV loaded");
    Ok(store)
}
