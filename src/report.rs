// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rendering of aggregation results: currency strings, the plain-text summary
//! export, the income vs expenses bar chart and the recent activity list.

use crate::engine::Summary;
use crate::error::FinanceResult;
use crate::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fs;
use std::path::{Path, PathBuf};

const RULE_HEAVY: &str = "==============================================";
const RULE_LIGHT: &str = "----------------------------------------------";

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_with_dp(amount: Decimal, symbol: &str, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.*}", dp as usize, rounded.abs());
    match text.split_once('.') {
        Some((int, frac)) => format!("{}{}{}.{}", symbol, sign, group_thousands(int), frac),
        None => format!("{}{}{}", symbol, sign, group_thousands(&text)),
    }
}

/// `₹1,234.50` style: two decimals, half-up, thousands separators. The sign
/// goes after the symbol (`₹-5.00`).
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    format_with_dp(amount, symbol, 2)
}

/// Whole units only, used for chart labels.
pub fn format_currency_rounded(amount: Decimal, symbol: &str) -> String {
    format_with_dp(amount, symbol, 0)
}

/// `summary_<date>.txt` for the whole history, `summary_<date>_<YYYY-MM>.txt`
/// for a single month, so the two never overwrite each other.
pub fn summary_file_name(date: NaiveDate, period: Option<&str>) -> String {
    match period {
        Some(p) => format!("summary_{}_{}.txt", date.format("%Y-%m-%d"), p),
        None => format!("summary_{}.txt", date.format("%Y-%m-%d")),
    }
}

pub fn render_summary_report(
    username: &str,
    date: NaiveDate,
    period: Option<&str>,
    summary: &Summary,
    symbol: &str,
) -> String {
    let mut out = String::new();
    out.push_str(RULE_HEAVY);
    out.push('\n');
    out.push_str("     PERSONAL FINANCE TRACKER - SUMMARY\n");
    out.push_str(RULE_HEAVY);
    out.push_str("\n\n");
    out.push_str(&format!("User: {}\n", username));
    out.push_str(&format!("Date: {}\n", date.format("%Y-%m-%d")));
    if let Some(p) = period {
        out.push_str(&format!("Period: {}\n", p));
    }
    out.push('\n');
    out.push_str(RULE_LIGHT);
    out.push('\n');
    out.push_str(&format!(
        "Total Income:     {}\n",
        format_currency(summary.total_income, symbol)
    ));
    out.push_str(&format!(
        "Total Expenses:   {}\n",
        format_currency(summary.total_expenses, symbol)
    ));
    out.push_str(&format!(
        "Savings:          {}\n",
        format_currency(summary.savings, symbol)
    ));
    out.push_str(RULE_LIGHT);
    out.push_str("\n\n");
    out.push_str("Generated by Personal Finance Tracker\n");
    out
}

/// Writes the summary report into `dir`, creating the directory if needed.
pub fn export_summary(
    dir: &Path,
    username: &str,
    date: NaiveDate,
    period: Option<&str>,
    summary: &Summary,
    symbol: &str,
) -> FinanceResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(summary_file_name(date, period));
    fs::write(
        &path,
        render_summary_report(username, date, period, summary, symbol),
    )?;
    tracing::info!(path = %path.display(), "summary exported");
    Ok(path)
}

// `value <= max` and `max > 0`, so the ratio stays within 0..=1.
fn bar_len(value: Decimal, max: Decimal, width: usize) -> usize {
    value
        .checked_div(max)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(width)))
        .and_then(|len| {
            len.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_usize()
        })
        .unwrap_or(0)
        .min(width)
}

/// Two horizontal bars scaled to the larger of the two values. When both are
/// zero the scale falls back to 100 so the bars are empty rather than undefined.
pub fn render_bar_chart(income: Decimal, expenses: Decimal, symbol: &str, width: usize) -> String {
    let mut max = income.max(expenses);
    if max <= Decimal::ZERO {
        max = Decimal::from(100);
    }
    let rows = [("Income", income), ("Expenses", expenses)];
    let mut out = String::from("Income vs Expenses\n");
    for (label, value) in rows {
        let len = bar_len(value.max(Decimal::ZERO), max, width);
        out.push_str(&format!(
            "{:<8} | {}{} {}\n",
            label,
            "█".repeat(len),
            " ".repeat(width - len),
            format_currency_rounded(value, symbol)
        ));
    }
    out
}

fn push_recent(out: &mut String, title: &str, records: &[Transaction], symbol: &str) {
    out.push_str(title);
    out.push('\n');
    for t in records {
        out.push_str(&format!(
            "  • {} - {} ({})\n",
            t.category,
            format_currency(t.amount, symbol),
            t.date
        ));
    }
}

/// "Recent Activity" block: the given incomes and expenses, most recent first,
/// or a hint when both are empty.
pub fn render_recent_activity(
    incomes: &[Transaction],
    expenses: &[Transaction],
    symbol: &str,
) -> String {
    let mut out = String::from("Recent Activity\n\n");
    push_recent(&mut out, "Recent Income:", incomes, symbol);
    out.push('\n');
    push_recent(&mut out, "Recent Expenses:", expenses, symbol);
    if incomes.is_empty() && expenses.is_empty() {
        out.push_str("\nNo transactions yet.\nStart by adding income or expenses!\n");
    }
    out
}
