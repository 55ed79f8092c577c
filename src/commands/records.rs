// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `income` and `expense` subcommands. Both kinds share the same handlers.

use crate::models::{Kind, NewTransaction, Transaction, User};
use crate::report::format_currency;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle(
    store: &mut dyn RecordStore,
    user: &User,
    kind: Kind,
    symbol: &str,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(store, user, kind, symbol, sub)?;
        }
        Some(("list", sub)) => list(&*store, user, kind, symbol, sub)?,
        Some(("edit", sub)) => {
            edit(store, user, kind, sub)?;
        }
        Some(("rm", sub)) => remove(store, user, kind, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add(
    store: &mut dyn RecordStore,
    user: &User,
    kind: Kind,
    symbol: &str,
    sub: &clap::ArgMatches,
) -> Result<Transaction> {
    let category = kind.canonical_category(sub.get_one::<String>("category").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let note = sub.get_one::<String>("note").cloned();

    let new = NewTransaction::new(user.id, kind, category, amount, date, note)?;
    let saved = store.insert(&new)?;
    println!(
        "Recorded {} {} of {} on {} (id {})",
        kind,
        saved.category,
        format_currency(saved.amount, symbol),
        saved.date,
        saved.id
    );
    Ok(saved)
}

#[derive(Debug, Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub category: String,
    pub amount: String,
    pub date: String,
    pub notes: String,
}

pub fn query_rows(
    store: &dyn RecordStore,
    user: &User,
    kind: Kind,
    sub: &clap::ArgMatches,
) -> Result<Vec<RecordRow>> {
    let mut records = match sub.get_one::<String>("month") {
        Some(month) => {
            let (m, y) = parse_month(month)?;
            store.fetch_by_owner_and_month(kind, user.id, m, y)?
        }
        None => store.fetch_by_owner(kind, user.id)?,
    };
    if let Some(limit) = sub.get_one::<usize>("limit") {
        records.truncate(*limit);
    }
    Ok(records
        .into_iter()
        .map(|t| RecordRow {
            id: t.id,
            category: t.category,
            amount: t.amount.to_string(),
            date: t.date.to_string(),
            notes: t.notes.unwrap_or_default(),
        })
        .collect())
}

fn list(
    store: &dyn RecordStore,
    user: &User,
    kind: Kind,
    symbol: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, user, kind, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let amount = r
                    .amount
                    .parse()
                    .map(|a| format_currency(a, symbol))
                    .unwrap_or_else(|_| r.amount.clone());
                vec![
                    r.id.to_string(),
                    r.category.clone(),
                    amount,
                    r.date.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Amount", "Date", "Notes"], rows)
        );
    }
    Ok(())
}

pub fn edit(
    store: &mut dyn RecordStore,
    user: &User,
    kind: Kind,
    sub: &clap::ArgMatches,
) -> Result<Transaction> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let Some(mut tx) = store.fetch_by_id(kind, user.id, id)? else {
        bail!("No {} with id {}", kind, id);
    };
    if let Some(c) = sub.get_one::<String>("category") {
        tx.category = kind.canonical_category(c)?.to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = parse_amount(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        tx.date = parse_date(d)?;
    }
    if let Some(n) = sub.get_one::<String>("note") {
        tx.notes = Some(n.clone()).filter(|n| !n.trim().is_empty());
    }
    if !store.update(&tx)? {
        bail!("No {} with id {}", kind, id);
    }
    println!("Updated {} {}", kind, id);
    Ok(tx)
}

pub fn remove(
    store: &mut dyn RecordStore,
    user: &User,
    kind: Kind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store.delete_by_id(kind, user.id, id)? {
        bail!("No {} with id {}", kind, id);
    }
    println!("Deleted {} {}", kind, id);
    Ok(())
}
