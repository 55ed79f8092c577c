// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record stores feeding the aggregation engine.
//!
//! Every store returns records most recent date first (ties broken by the
//! highest id). Records are always scoped to a single owner.

pub mod guest;
pub mod sqlite;

pub use guest::GuestStore;
pub use sqlite::SqliteStore;

use crate::error::FinanceResult;
use crate::models::{Kind, NewTransaction, Transaction};

pub trait RecordStore {
    fn fetch_by_owner(&self, kind: Kind, owner_id: i64) -> FinanceResult<Vec<Transaction>>;

    fn fetch_by_owner_and_month(
        &self,
        kind: Kind,
        owner_id: i64,
        month: u32,
        year: i32,
    ) -> FinanceResult<Vec<Transaction>>;

    fn fetch_by_id(&self, kind: Kind, owner_id: i64, id: i64)
    -> FinanceResult<Option<Transaction>>;

    fn insert(&mut self, tx: &NewTransaction) -> FinanceResult<Transaction>;

    /// Replaces category, amount, date and notes. Returns `false` when no
    /// record with that id exists for the owner.
    fn update(&mut self, tx: &Transaction) -> FinanceResult<bool>;

    fn delete_by_id(&mut self, kind: Kind, owner_id: i64, id: i64) -> FinanceResult<bool>;
}

pub(crate) fn sort_recent_first(records: &mut [Transaction]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}
