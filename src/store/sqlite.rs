// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::RecordStore;
use crate::db::init_schema;
use crate::engine::month_start;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Kind, NewTransaction, Transaction};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

/// Connection handle for the persisted record store. Constructed explicitly and
/// passed to whoever needs it; dropping or calling [`SqliteStore::close`] ends it.
pub struct SqliteStore {
    conn: Connection,
}

struct Table {
    name: &'static str,
    id_col: &'static str,
}

fn table(kind: Kind) -> Table {
    match kind {
        Kind::Income => Table {
            name: "incomes",
            id_col: "income_id",
        },
        Kind::Expense => Table {
            name: "expenses",
            id_col: "expense_id",
        },
    }
}

struct RawRow {
    id: i64,
    owner_id: i64,
    category: String,
    amount: String,
    date: String,
    notes: Option<String>,
    created_at: Option<String>,
}

impl RawRow {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
        Ok(RawRow {
            id: r.get(0)?,
            owner_id: r.get(1)?,
            category: r.get(2)?,
            amount: r.get(3)?,
            date: r.get(4)?,
            notes: r.get(5)?,
            created_at: r.get(6)?,
        })
    }

    fn decode(self, kind: Kind) -> FinanceResult<Transaction> {
        let amount = self.amount.parse::<Decimal>().map_err(|_| {
            FinanceError::CorruptRecord(format!(
                "{} {} has invalid amount '{}'",
                kind, self.id, self.amount
            ))
        })?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            FinanceError::CorruptRecord(format!(
                "{} {} has invalid date '{}'",
                kind, self.id, self.date
            ))
        })?;
        let created_at = self
            .created_at
            .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok());
        Ok(Transaction {
            id: self.id,
            owner_id: self.owner_id,
            kind,
            category: self.category,
            amount,
            date,
            notes: self.notes,
            created_at,
        })
    }
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and its parent directory,
    /// then makes sure the schema exists.
    pub fn open(path: &Path) -> FinanceResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "database ready");
        Ok(SqliteStore { conn })
    }

    pub fn open_in_memory() -> FinanceResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn close(self) -> FinanceResult<()> {
        self.conn.close().map_err(|(_, e)| FinanceError::from(e))
    }

    fn query(
        &self,
        kind: Kind,
        filter: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> FinanceResult<Vec<Transaction>> {
        let t = table(kind);
        let sql = format!(
            "SELECT {id}, user_id, category, amount, date, notes, created_at FROM {name} \
             WHERE {filter} ORDER BY date DESC, {id} DESC",
            id = t.id_col,
            name = t.name,
            filter = filter,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(args, RawRow::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.decode(kind)?);
        }
        Ok(data)
    }
}

impl RecordStore for SqliteStore {
    fn fetch_by_owner(&self, kind: Kind, owner_id: i64) -> FinanceResult<Vec<Transaction>> {
        let data = self.query(kind, "user_id=?1", &[&owner_id])?;
        tracing::debug!(%kind, owner_id, count = data.len(), "fetched records");
        Ok(data)
    }

    fn fetch_by_owner_and_month(
        &self,
        kind: Kind,
        owner_id: i64,
        month: u32,
        year: i32,
    ) -> FinanceResult<Vec<Transaction>> {
        let start = month_start(month, year)?;
        let key = start.format("%Y-%m").to_string();
        let data = self.query(kind, "user_id=?1 AND substr(date,1,7)=?2", &[&owner_id, &key])?;
        tracing::debug!(%kind, owner_id, month = %key, count = data.len(), "fetched month");
        Ok(data)
    }

    fn fetch_by_id(
        &self,
        kind: Kind,
        owner_id: i64,
        id: i64,
    ) -> FinanceResult<Option<Transaction>> {
        let t = table(kind);
        let sql = format!(
            "SELECT {id}, user_id, category, amount, date, notes, created_at FROM {name} \
             WHERE {id}=?1 AND user_id=?2",
            id = t.id_col,
            name = t.name,
        );
        let raw = self
            .conn
            .query_row(&sql, params![id, owner_id], RawRow::from_row)
            .optional()?;
        raw.map(|r| r.decode(kind)).transpose()
    }

    fn insert(&mut self, tx: &NewTransaction) -> FinanceResult<Transaction> {
        tx.validate()?;
        let t = table(tx.kind);
        let sql = format!(
            "INSERT INTO {}(user_id, category, amount, date, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
            t.name
        );
        self.conn.execute(
            &sql,
            params![
                tx.owner_id,
                tx.category,
                tx.amount.to_string(),
                tx.date.to_string(),
                tx.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(kind = %tx.kind, id, owner_id = tx.owner_id, "record inserted");
        self.fetch_by_id(tx.kind, tx.owner_id, id)?.ok_or_else(|| {
            FinanceError::CorruptRecord(format!("{} {} vanished after insert", tx.kind, id))
        })
    }

    fn update(&mut self, tx: &Transaction) -> FinanceResult<bool> {
        tx.validate()?;
        let t = table(tx.kind);
        let sql = format!(
            "UPDATE {} SET category=?1, amount=?2, date=?3, notes=?4 WHERE {}=?5 AND user_id=?6",
            t.name, t.id_col
        );
        let changed = self.conn.execute(
            &sql,
            params![
                tx.category,
                tx.amount.to_string(),
                tx.date.to_string(),
                tx.notes,
                tx.id,
                tx.owner_id
            ],
        )?;
        tracing::info!(kind = %tx.kind, id = tx.id, changed, "record updated");
        Ok(changed > 0)
    }

    fn delete_by_id(&mut self, kind: Kind, owner_id: i64, id: i64) -> FinanceResult<bool> {
        let t = table(kind);
        let sql = format!("DELETE FROM {} WHERE {}=?1 AND user_id=?2", t.name, t.id_col);
        let changed = self.conn.execute(&sql, params![id, owner_id])?;
        tracing::info!(%kind, id, changed, "record deleted");
        Ok(changed > 0)
    }
}
