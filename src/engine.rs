// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation over income and expense records.
//!
//! All arithmetic is exact, checked `Decimal` addition and subtraction; nothing
//! is rounded until a value is formatted for display. A sum that leaves the
//! `Decimal` range is reported as [`FinanceError::Overflow`].
//!
//! `summary` and `monthly_summary` read incomes and expenses with two separate
//! fetches. They are not wrapped in a single store transaction, so a write that
//! lands between the two reads shows up in one half of the result only.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Kind, Transaction};
use crate::store::RecordStore;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

fn add_amounts(acc: Decimal, amount: Decimal) -> FinanceResult<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| FinanceError::Overflow(format!("{} + {}", acc, amount)))
}

pub fn total_of(transactions: &[Transaction]) -> FinanceResult<Decimal> {
    transactions
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| add_amounts(acc, t.amount))
}

pub fn savings(income: Decimal, expenses: Decimal) -> FinanceResult<Decimal> {
    income
        .checked_sub(expenses)
        .ok_or_else(|| FinanceError::Overflow(format!("{} - {}", income, expenses)))
}

/// First day of the given calendar month.
pub fn month_start(month: u32, year: i32) -> FinanceResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(FinanceError::invalid(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    if !(1..=9999).contains(&year) {
        return Err(FinanceError::invalid(format!(
            "Year must be between 1 and 9999, got {}",
            year
        )));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| FinanceError::invalid(format!("Invalid month {}-{}", year, month)))
}

pub fn filter_by_month(
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> FinanceResult<Vec<Transaction>> {
    month_start(month, year)?;
    Ok(transactions
        .iter()
        .filter(|t| t.date.month() == month && t.date.year() == year)
        .cloned()
        .collect())
}

pub fn category_breakdown(
    transactions: &[Transaction],
) -> FinanceResult<BTreeMap<String, Decimal>> {
    let mut breakdown = BTreeMap::new();
    for t in transactions {
        let slot = breakdown.entry(t.category.clone()).or_insert(Decimal::ZERO);
        *slot = add_amounts(*slot, t.amount)?;
    }
    Ok(breakdown)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_savings: Decimal,
}

impl From<MonthlySummary> for Summary {
    fn from(m: MonthlySummary) -> Self {
        Summary {
            total_income: m.monthly_income,
            total_expenses: m.monthly_expenses,
            savings: m.monthly_savings,
        }
    }
}

/// Composes store fetches with the aggregation functions above. Guest and
/// persisted stores go through exactly the same path.
pub struct FinanceService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> FinanceService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        FinanceService { store }
    }

    pub fn total(&self, kind: Kind, user_id: i64) -> FinanceResult<Decimal> {
        total_of(&self.store.fetch_by_owner(kind, user_id)?)
    }

    pub fn monthly_total(
        &self,
        kind: Kind,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> FinanceResult<Decimal> {
        month_start(month, year)?;
        let records = self
            .store
            .fetch_by_owner_and_month(kind, user_id, month, year)?;
        total_of(&records)
    }

    pub fn summary(&self, user_id: i64) -> FinanceResult<Summary> {
        let total_income = self.total(Kind::Income, user_id)?;
        let total_expenses = self.total(Kind::Expense, user_id)?;
        tracing::debug!(user_id, %total_income, %total_expenses, "summary computed");
        Ok(Summary {
            total_income,
            total_expenses,
            savings: savings(total_income, total_expenses)?,
        })
    }

    pub fn monthly_summary(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> FinanceResult<MonthlySummary> {
        let monthly_income = self.monthly_total(Kind::Income, user_id, month, year)?;
        let monthly_expenses = self.monthly_total(Kind::Expense, user_id, month, year)?;
        Ok(MonthlySummary {
            month,
            year,
            monthly_income,
            monthly_expenses,
            monthly_savings: savings(monthly_income, monthly_expenses)?,
        })
    }

    /// Per-category totals, optionally limited to one `(month, year)`.
    pub fn breakdown(
        &self,
        kind: Kind,
        user_id: i64,
        window: Option<(u32, i32)>,
    ) -> FinanceResult<BTreeMap<String, Decimal>> {
        let records = match window {
            Some((month, year)) => {
                month_start(month, year)?;
                self.store
                    .fetch_by_owner_and_month(kind, user_id, month, year)?
            }
            None => self.store.fetch_by_owner(kind, user_id)?,
        };
        category_breakdown(&records)
    }

    pub fn income_breakdown(&self, user_id: i64) -> FinanceResult<BTreeMap<String, Decimal>> {
        self.breakdown(Kind::Income, user_id, None)
    }

    pub fn expense_breakdown(&self, user_id: i64) -> FinanceResult<BTreeMap<String, Decimal>> {
        self.breakdown(Kind::Expense, user_id, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::store::{GuestStore, RecordStore};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tx(id: i64, category: &str, amount: &str, date: (i32, u32, u32)) -> Transaction {
        Transaction {
            id,
            owner_id: 7,
            kind: Kind::Expense,
            category: category.into(),
            amount: dec(amount),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            notes: None,
            created_at: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "Food", "12.10", (2025, 1, 3)),
            tx(2, "Rent", "15000", (2025, 1, 1)),
            tx(3, "Food", "7.905", (2025, 2, 14)),
            tx(4, "Custom", "0.01", (2024, 1, 9)),
        ]
    }

    #[test]
    fn total_of_empty_is_exact_zero() {
        assert_eq!(total_of(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn total_of_is_order_independent() {
        let forward = sample();
        let mut backward = sample();
        backward.reverse();
        let mut shuffled = sample();
        shuffled.swap(0, 2);
        let total = total_of(&forward).unwrap();
        assert_eq!(total, dec("15020.015"));
        assert_eq!(total, total_of(&backward).unwrap());
        assert_eq!(total, total_of(&shuffled).unwrap());
    }

    #[test]
    fn cents_do_not_drift() {
        let cents: Vec<_> = (1..=3).map(|i| tx(i, "Food", "0.01", (2025, 1, 1))).collect();
        assert_eq!(total_of(&cents).unwrap(), dec("0.03"));
    }

    #[test]
    fn savings_can_go_negative() {
        assert_eq!(savings(dec("100"), dec("250.50")).unwrap(), dec("-150.50"));
        assert_eq!(savings(dec("0"), dec("0")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn sums_past_decimal_range_are_errors() {
        let huge = "50000000000000000000000000000";
        let records = vec![tx(1, "Rent", huge, (2025, 1, 1)), tx(2, "Rent", huge, (2025, 1, 2))];
        assert!(matches!(total_of(&records), Err(FinanceError::Overflow(_))));
        assert!(matches!(
            category_breakdown(&records),
            Err(FinanceError::Overflow(_))
        ));
        assert!(matches!(
            savings(-Decimal::MAX, Decimal::MAX),
            Err(FinanceError::Overflow(_))
        ));
    }

    /// Serves rows as-is, the way a database written by other tools could.
    struct FixedStore(Vec<Transaction>);

    impl RecordStore for FixedStore {
        fn fetch_by_owner(&self, kind: Kind, owner_id: i64) -> FinanceResult<Vec<Transaction>> {
            Ok(self
                .0
                .iter()
                .filter(|t| t.kind == kind && t.owner_id == owner_id)
                .cloned()
                .collect())
        }

        fn fetch_by_owner_and_month(
            &self,
            kind: Kind,
            owner_id: i64,
            month: u32,
            year: i32,
        ) -> FinanceResult<Vec<Transaction>> {
            filter_by_month(&self.fetch_by_owner(kind, owner_id)?, month, year)
        }

        fn fetch_by_id(&self, _: Kind, _: i64, _: i64) -> FinanceResult<Option<Transaction>> {
            Ok(None)
        }

        fn insert(&mut self, _: &NewTransaction) -> FinanceResult<Transaction> {
            Err(FinanceError::invalid("read only"))
        }

        fn update(&mut self, _: &Transaction) -> FinanceResult<bool> {
            Ok(false)
        }

        fn delete_by_id(&mut self, _: Kind, _: i64, _: i64) -> FinanceResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn service_reports_overflow_instead_of_panicking() {
        let huge = "50000000000000000000000000000";
        let store = FixedStore(vec![
            tx(1, "Rent", huge, (2025, 1, 1)),
            tx(2, "Rent", huge, (2025, 1, 2)),
        ]);
        let svc = FinanceService::new(&store);
        assert!(matches!(svc.summary(7), Err(FinanceError::Overflow(_))));
        assert!(matches!(
            svc.monthly_summary(7, 1, 2025),
            Err(FinanceError::Overflow(_))
        ));
        assert!(svc.expense_breakdown(7).is_err());
    }

    #[test]
    fn filter_by_month_matches_month_and_year() {
        let jan = filter_by_month(&sample(), 1, 2025).unwrap();
        let ids: Vec<i64> = jan.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn filter_by_month_is_idempotent() {
        let once = filter_by_month(&sample(), 1, 2025).unwrap();
        let twice = filter_by_month(&once, 1, 2025).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_by_month_rejects_out_of_range_month() {
        for month in [0, 13] {
            let err = filter_by_month(&sample(), month, 2025).unwrap_err();
            assert!(matches!(err, FinanceError::InvalidArgument(_)));
        }
    }

    #[test]
    fn month_start_accepts_four_digit_years_only() {
        assert!(month_start(1, 1).is_ok());
        assert!(month_start(12, 9999).is_ok());
        for year in [0, -1, 10000] {
            assert!(matches!(
                month_start(1, year),
                Err(FinanceError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn breakdown_sums_back_to_total() {
        let records = sample();
        let breakdown = category_breakdown(&records).unwrap();
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown["Food"], dec("20.005"));
        assert_eq!(breakdown["Custom"], dec("0.01"));
        assert!(!breakdown.contains_key("Utilities"));
        let sum: Decimal = breakdown.values().copied().sum();
        assert_eq!(sum, total_of(&records).unwrap());
    }

    #[test]
    fn service_reports_zero_for_unknown_user() {
        let store = GuestStore::new();
        let svc = FinanceService::new(&store);
        let s = svc.summary(42).unwrap();
        assert_eq!(s.total_income, Decimal::ZERO);
        assert_eq!(s.total_expenses, Decimal::ZERO);
        assert_eq!(s.savings, Decimal::ZERO);
        assert!(svc.expense_breakdown(42).unwrap().is_empty());
    }

    #[test]
    fn service_monthly_summary_validates_month() {
        let store = GuestStore::new();
        let svc = FinanceService::new(&store);
        assert!(matches!(
            svc.monthly_summary(1, 13, 2025),
            Err(FinanceError::InvalidArgument(_))
        ));
        assert!(svc.breakdown(Kind::Income, 1, Some((0, 2025))).is_err());
    }

    #[test]
    fn service_breakdown_over_window() {
        let mut store = GuestStore::new();
        let owner = crate::models::GUEST_OWNER_ID;
        for (cat, amt, m) in [("Salary", "100", 1), ("Salary", "50", 2), ("Gift", "5", 1)] {
            let new = NewTransaction::new(
                owner,
                Kind::Income,
                cat,
                dec(amt),
                NaiveDate::from_ymd_opt(2025, m, 10).unwrap(),
                None,
            )
            .unwrap();
            store.insert(&new).unwrap();
        }
        let svc = FinanceService::new(&store);
        let jan = svc.breakdown(Kind::Income, owner, Some((1, 2025))).unwrap();
        assert_eq!(jan["Salary"], dec("100"));
        assert_eq!(jan["Gift"], dec("5"));
        let all = svc.income_breakdown(owner).unwrap();
        assert_eq!(all["Salary"], dec("150"));
    }
}
