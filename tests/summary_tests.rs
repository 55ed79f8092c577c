// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::engine::{FinanceService, category_breakdown, savings, total_of};
use pennywise::error::FinanceError;
use pennywise::models::{GUEST_OWNER_ID, Kind, NewTransaction};
use pennywise::store::{GuestStore, RecordStore, SqliteStore};
use rusqlite::params;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const JANUARY: &[(Kind, &str, &str, &str)] = &[
    (Kind::Income, "Salary", "50000", "2025-01-05"),
    (Kind::Income, "Bonus", "10000", "2025-01-20"),
    (Kind::Expense, "Rent", "15000", "2025-01-01"),
    (Kind::Expense, "Food", "3000", "2025-01-15"),
];

fn fill(store: &mut dyn RecordStore, owner: i64, rows: &[(Kind, &str, &str, &str)]) {
    for (kind, cat, amt, date) in rows {
        let new = NewTransaction::new(owner, *kind, *cat, dec(amt), day(date), None).unwrap();
        store.insert(&new).unwrap();
    }
}

fn sqlite_with_users(names: &[&str]) -> (SqliteStore, Vec<i64>) {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut ids = Vec::new();
    for name in names {
        store
            .conn()
            .execute(
                "INSERT INTO users(username, password_hash) VALUES (?1, 'x')",
                params![name],
            )
            .unwrap();
        ids.push(store.conn().last_insert_rowid());
    }
    (store, ids)
}

#[test]
fn january_scenario_totals() {
    let (mut store, ids) = sqlite_with_users(&["ana"]);
    fill(&mut store, ids[0], JANUARY);

    let svc = FinanceService::new(&store);
    let s = svc.summary(ids[0]).unwrap();
    assert_eq!(s.total_income, dec("60000"));
    assert_eq!(s.total_expenses, dec("18000"));
    assert_eq!(s.savings, dec("42000"));

    let jan = svc.monthly_summary(ids[0], 1, 2025).unwrap();
    assert_eq!(jan.monthly_income, dec("60000"));
    assert_eq!(jan.monthly_savings, dec("42000"));
}

#[test]
fn february_window_over_january_data_is_zero() {
    let (mut store, ids) = sqlite_with_users(&["ana"]);
    fill(&mut store, ids[0], JANUARY);

    let feb = FinanceService::new(&store)
        .monthly_summary(ids[0], 2, 2025)
        .unwrap();
    assert_eq!(feb.monthly_income, Decimal::ZERO);
    assert_eq!(feb.monthly_expenses, Decimal::ZERO);
    assert_eq!(feb.monthly_savings, Decimal::ZERO);
}

#[test]
fn user_without_records_gets_zero_summary() {
    let (store, ids) = sqlite_with_users(&["empty"]);
    let s = FinanceService::new(&store).summary(ids[0]).unwrap();
    assert_eq!(
        (s.total_income, s.total_expenses, s.savings),
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    );
}

#[test]
fn other_users_records_are_not_aggregated() {
    let (mut store, ids) = sqlite_with_users(&["ana", "bob"]);
    fill(&mut store, ids[0], JANUARY);
    fill(
        &mut store,
        ids[1],
        &[(Kind::Expense, "Food", "99.99", "2025-01-02")],
    );

    let svc = FinanceService::new(&store);
    assert_eq!(svc.summary(ids[0]).unwrap().total_expenses, dec("18000"));
    let bob = svc.summary(ids[1]).unwrap();
    assert_eq!(bob.total_income, Decimal::ZERO);
    assert_eq!(bob.savings, dec("-99.99"));
}

#[test]
fn stored_cents_sum_exactly() {
    let (mut store, ids) = sqlite_with_users(&["ana"]);
    let cents = [(Kind::Expense, "Food", "0.01", "2025-01-01"); 3];
    fill(&mut store, ids[0], &cents);
    let total = FinanceService::new(&store)
        .total(Kind::Expense, ids[0])
        .unwrap();
    assert_eq!(total, dec("0.03"));
    assert_eq!(total.to_string(), "0.03");
}

#[test]
fn breakdown_and_savings_identities_hold_over_store_data() {
    let (mut store, ids) = sqlite_with_users(&["ana"]);
    fill(&mut store, ids[0], JANUARY);
    fill(
        &mut store,
        ids[0],
        &[
            (Kind::Expense, "Food", "12.345", "2025-03-01"),
            (Kind::Expense, "Rent", "45000.655", "2025-03-01"),
        ],
    );

    let incomes = store.fetch_by_owner(Kind::Income, ids[0]).unwrap();
    let expenses = store.fetch_by_owner(Kind::Expense, ids[0]).unwrap();
    let per_cat = category_breakdown(&expenses).unwrap();
    assert_eq!(per_cat["Food"], dec("3012.345"));
    assert_eq!(
        per_cat.values().copied().sum::<Decimal>(),
        total_of(&expenses).unwrap()
    );

    let svc = FinanceService::new(&store);
    let s = svc.summary(ids[0]).unwrap();
    let expected = savings(total_of(&incomes).unwrap(), total_of(&expenses).unwrap()).unwrap();
    assert_eq!(s.savings, expected);
    assert!(s.savings < Decimal::ZERO);
    assert_eq!(svc.expense_breakdown(ids[0]).unwrap(), per_cat);
}

#[test]
fn guest_and_persisted_stores_aggregate_identically() {
    let (mut sqlite, ids) = sqlite_with_users(&["ana"]);
    fill(&mut sqlite, ids[0], JANUARY);
    let mut guest = GuestStore::new();
    fill(&mut guest, GUEST_OWNER_ID, JANUARY);

    let persisted = FinanceService::new(&sqlite);
    let session = FinanceService::new(&guest);
    assert_eq!(
        persisted.summary(ids[0]).unwrap(),
        session.summary(GUEST_OWNER_ID).unwrap()
    );
    assert_eq!(
        persisted.monthly_summary(ids[0], 1, 2025).unwrap().monthly_savings,
        session
            .monthly_summary(GUEST_OWNER_ID, 1, 2025)
            .unwrap()
            .monthly_savings
    );
    assert_eq!(
        persisted.income_breakdown(ids[0]).unwrap(),
        session.income_breakdown(GUEST_OWNER_ID).unwrap()
    );
}

#[test]
fn store_failure_propagates_instead_of_zero() {
    let (store, ids) = sqlite_with_users(&["ana"]);
    store.conn().execute_batch("DROP TABLE expenses").unwrap();
    let err = FinanceService::new(&store).summary(ids[0]).unwrap_err();
    assert!(matches!(err, FinanceError::StoreUnavailable(_)));
}
