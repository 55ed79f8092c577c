// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the record stores, the aggregation engine and the
/// credential checks. Every variant renders as a single human-readable line.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
    #[error("Amount out of range: {0}")]
    Overflow(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("Credential error: {0}")]
    Credentials(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FinanceResult<T> = Result<T, FinanceError>;

impl FinanceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        FinanceError::InvalidArgument(msg.into())
    }
}
