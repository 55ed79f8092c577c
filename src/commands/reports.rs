// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{FinanceService, Summary};
use crate::models::{Kind, Transaction, User};
use crate::report::{export_summary, format_currency, render_bar_chart, render_recent_activity};
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

pub fn handle(
    store: &dyn RecordStore,
    user: &User,
    symbol: &str,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(store, user, symbol, sub)?,
        Some(("summary", sub)) => summary(store, user, symbol, sub)?,
        Some(("breakdown", sub)) => breakdown(store, user, symbol, sub)?,
        Some(("chart", sub)) => {
            let view = compute_summary(store, user, sub.get_one::<String>("month"))?;
            let width = *sub.get_one::<usize>("width").unwrap_or(&40);
            print!(
                "{}",
                render_bar_chart(view.total_income, view.total_expenses, symbol, width)
            );
        }
        Some(("export", sub)) => {
            let path = export(store, user, symbol, sub)?;
            println!("Summary exported to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub period: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
}

impl SummaryView {
    /// `None` for the whole history, `YYYY-MM` otherwise.
    pub fn month(&self) -> Option<&str> {
        (self.period != "all").then_some(self.period.as_str())
    }

    pub fn as_summary(&self) -> Summary {
        Summary {
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            savings: self.savings,
        }
    }
}

/// Whole history, or a single month when `month` (`YYYY-MM`) is given.
pub fn compute_summary(
    store: &dyn RecordStore,
    user: &User,
    month: Option<&String>,
) -> Result<SummaryView> {
    let svc = FinanceService::new(store);
    let (period, s) = match month {
        Some(raw) => {
            let (m, y) = parse_month(raw)?;
            let monthly = svc.monthly_summary(user.id, m, y)?;
            (format!("{:04}-{:02}", y, m), Summary::from(monthly))
        }
        None => ("all".to_string(), svc.summary(user.id)?),
    };
    Ok(SummaryView {
        period,
        total_income: s.total_income,
        total_expenses: s.total_expenses,
        savings: s.savings,
    })
}

pub fn print_summary(view: &SummaryView, symbol: &str) {
    let data = vec![
        vec![
            "Total Income".to_string(),
            format_currency(view.total_income, symbol),
        ],
        vec![
            "Total Expenses".to_string(),
            format_currency(view.total_expenses, symbol),
        ],
        vec!["Savings".to_string(), format_currency(view.savings, symbol)],
    ];
    let header = format!("Period: {}", view.period);
    println!("{}", pretty_table(&[header.as_str(), "Amount"], data));
}

fn summary(
    store: &dyn RecordStore,
    user: &User,
    symbol: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let view = compute_summary(store, user, sub.get_one::<String>("month"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        print_summary(&view, symbol);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub category: String,
    pub amount: Decimal,
}

/// Category totals, largest first.
pub fn compute_breakdown(
    store: &dyn RecordStore,
    user: &User,
    kind: Kind,
    month: Option<&String>,
) -> Result<Vec<BreakdownRow>> {
    let window = month.map(|m| parse_month(m)).transpose()?;
    let map = FinanceService::new(store).breakdown(kind, user.id, window)?;
    let mut rows: Vec<BreakdownRow> = map
        .into_iter()
        .map(|(category, amount)| BreakdownRow { category, amount })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    Ok(rows)
}

pub fn print_breakdown(kind: Kind, rows: &[BreakdownRow], symbol: &str) {
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.category.clone(), format_currency(r.amount, symbol)])
        .collect();
    let hdr = match kind {
        Kind::Income => "Earned",
        Kind::Expense => "Spent",
    };
    println!("{}", pretty_table(&["Category", hdr], data));
}

fn breakdown(
    store: &dyn RecordStore,
    user: &User,
    symbol: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let kind = Kind::parse(sub.get_one::<String>("kind").unwrap())?;
    let rows = compute_breakdown(store, user, kind, sub.get_one::<String>("month"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        print_breakdown(kind, &rows, symbol);
    }
    Ok(())
}

pub fn export(
    store: &dyn RecordStore,
    user: &User,
    symbol: &str,
    sub: &clap::ArgMatches,
) -> Result<PathBuf> {
    let view = compute_summary(store, user, sub.get_one::<String>("month"))?;
    let dir = match sub.get_one::<String>("dir") {
        Some(d) => PathBuf::from(d.trim()),
        None => crate::db::reports_dir()?,
    };
    let today = chrono::Local::now().date_naive();
    let path = export_summary(
        &dir,
        &user.username,
        today,
        view.month(),
        &view.as_summary(),
        symbol,
    )
    .with_context(|| format!("Exporting summary to {}", dir.display()))?;
    Ok(path)
}

/// Number of entries of each kind shown under recent activity.
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub recent_incomes: Vec<Transaction>,
    pub recent_expenses: Vec<Transaction>,
}

/// Overall totals plus the latest few entries of each kind.
pub fn compute_dashboard(store: &dyn RecordStore, user: &User) -> Result<DashboardView> {
    let summary = compute_summary(store, user, None)?;
    let mut recent_incomes = store.fetch_by_owner(Kind::Income, user.id)?;
    recent_incomes.truncate(RECENT_LIMIT);
    let mut recent_expenses = store.fetch_by_owner(Kind::Expense, user.id)?;
    recent_expenses.truncate(RECENT_LIMIT);
    Ok(DashboardView {
        summary,
        recent_incomes,
        recent_expenses,
    })
}

fn dashboard(
    store: &dyn RecordStore,
    user: &User,
    symbol: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let view = compute_dashboard(store, user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        println!("Welcome back, {}!", user.username);
        print_summary(&view.summary, symbol);
        println!();
        print!(
            "{}",
            render_recent_activity(&view.recent_incomes, &view.recent_expenses, symbol)
        );
    }
    Ok(())
}
