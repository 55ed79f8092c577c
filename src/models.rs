// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinanceError, FinanceResult};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner id reserved for unpersisted guest sessions.
pub const GUEST_OWNER_ID: i64 = -1;

/// Largest accepted single amount, in whole currency units.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Bonus",
    "Gift",
    "Other",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Rent",
    "Transportation",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Education",
    "Bills",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Kind::Income => INCOME_CATEGORIES,
            Kind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Resolve user input to one of the fixed category labels, ignoring case.
    pub fn canonical_category(self, raw: &str) -> FinanceResult<&'static str> {
        let raw = raw.trim();
        self.categories()
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(raw))
            .ok_or_else(|| {
                FinanceError::invalid(format!(
                    "Unknown {} category '{}' (expected one of: {})",
                    self,
                    raw,
                    self.categories().join(", ")
                ))
            })
    }

    pub fn parse(s: &str) -> FinanceResult<Kind> {
        match s.trim().to_lowercase().as_str() {
            "income" | "incomes" => Ok(Kind::Income),
            "expense" | "expenses" => Ok(Kind::Expense),
            other => Err(FinanceError::invalid(format!(
                "Unknown kind '{}', expected income|expense",
                other
            ))),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Income => write!(f, "income"),
            Kind::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    pub fn guest() -> Self {
        User {
            id: GUEST_OWNER_ID,
            username: "Guest".into(),
            password_hash: String::new(),
            created_at: None,
        }
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner_id: i64,
    pub kind: Kind,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Transaction {
    /// Checks the fields an update is allowed to change.
    pub fn validate(&self) -> FinanceResult<()> {
        validate_category(&self.category)?;
        validate_amount(self.amount)
    }
}

/// A record that has not been stored yet; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub owner_id: i64,
    pub kind: Kind,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(
        owner_id: i64,
        kind: Kind,
        category: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        notes: Option<String>,
    ) -> FinanceResult<Self> {
        let new = NewTransaction {
            owner_id,
            kind,
            category: category.into(),
            amount,
            date,
            notes: notes.filter(|n| !n.trim().is_empty()),
        };
        new.validate()?;
        Ok(new)
    }

    /// Re-checked by the stores on insert.
    pub fn validate(&self) -> FinanceResult<()> {
        validate_category(&self.category)?;
        validate_amount(self.amount)
    }

    pub fn into_transaction(
        self,
        id: i64,
        created_at: Option<NaiveDateTime>,
    ) -> Transaction {
        Transaction {
            id,
            owner_id: self.owner_id,
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            date: self.date,
            notes: self.notes,
            created_at,
        }
    }
}

pub fn validate_amount(amount: Decimal) -> FinanceResult<()> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::invalid(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    if amount > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(FinanceError::invalid(format!(
            "Amount must not exceed {}, got {}",
            MAX_AMOUNT_UNITS, amount
        )));
    }
    Ok(())
}

fn validate_category(category: &str) -> FinanceResult<()> {
    if category.trim().is_empty() {
        return Err(FinanceError::invalid("Category must not be empty"));
    }
    Ok(())
}
