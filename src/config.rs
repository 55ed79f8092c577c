// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinanceError, FinanceResult};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Once;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber once. `RUST_LOG` overrides the
/// default `pennywise=warn`; output goes to stderr so stdout stays clean for
/// tables and JSON.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pennywise=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn get_setting(conn: &Connection, key: &str) -> FinanceResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> FinanceResult<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency_symbol(conn: &Connection) -> FinanceResult<String> {
    Ok(get_setting(conn, "currency_symbol")?
        .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> FinanceResult<()> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(FinanceError::invalid("Currency symbol must not be empty"));
    }
    set_setting(conn, "currency_symbol", symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    #[test]
    fn currency_symbol_defaults_and_overrides() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(get_currency_symbol(&conn).unwrap(), "₹");
        set_currency_symbol(&conn, " $ ").unwrap();
        assert_eq!(get_currency_symbol(&conn).unwrap(), "$");
        set_currency_symbol(&conn, "€").unwrap();
        assert_eq!(get_currency_symbol(&conn).unwrap(), "€");
        assert!(set_currency_symbol(&conn, "  ").is_err());
    }
}
