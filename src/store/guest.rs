// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{RecordStore, sort_recent_first};
use crate::engine::filter_by_month;
use crate::error::FinanceResult;
use crate::models::{Kind, NewTransaction, Transaction};

/// Session-local records that are never written anywhere.
///
/// Ids are handed out sequentially per kind, starting at 1, and are not
/// reused after a delete.
#[derive(Debug, Default)]
pub struct GuestStore {
    records: Vec<Transaction>,
    last_income_id: i64,
    last_expense_id: i64,
}

impl GuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn next_id(&mut self, kind: Kind) -> i64 {
        let counter = match kind {
            Kind::Income => &mut self.last_income_id,
            Kind::Expense => &mut self.last_expense_id,
        };
        *counter += 1;
        *counter
    }

    fn position(&self, kind: Kind, owner_id: i64, id: i64) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.kind == kind && r.owner_id == owner_id && r.id == id)
    }
}

impl RecordStore for GuestStore {
    fn fetch_by_owner(&self, kind: Kind, owner_id: i64) -> FinanceResult<Vec<Transaction>> {
        let mut data: Vec<Transaction> = self
            .records
            .iter()
            .filter(|r| r.kind == kind && r.owner_id == owner_id)
            .cloned()
            .collect();
        sort_recent_first(&mut data);
        Ok(data)
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

    fn fetch_by_id(
        &self,
        kind: Kind,
        owner_id: i64,
        id: i64,
    ) -> FinanceResult<Option<Transaction>> {
        Ok(self
            .position(kind, owner_id, id)
            .map(|i| self.records[i].clone()))
    }

    fn insert(&mut self, tx: &NewTransaction) -> FinanceResult<Transaction> {
        tx.validate()?;
        let id = self.next_id(tx.kind);
        let saved = tx.clone().into_transaction(id, None);
        self.records.push(saved.clone());
        tracing::debug!(kind = %tx.kind, id, "guest record added");
        Ok(saved)
    }

    fn update(&mut self, tx: &Transaction) -> FinanceResult<bool> {
        tx.validate()?;
        match self.position(tx.kind, tx.owner_id, tx.id) {
            Some(i) => {
                let current = &mut self.records[i];
                current.category = tx.category.clone();
                current.amount = tx.amount;
                current.date = tx.date;
                current.notes = tx.notes.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_by_id(&mut self, kind: Kind, owner_id: i64, id: i64) -> FinanceResult<bool> {
        match self.position(kind, owner_id, id) {
            Some(i) => {
                self.records.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
