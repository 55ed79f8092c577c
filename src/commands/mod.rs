// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod guest;
pub mod records;
pub mod reports;
pub mod settings;
pub mod users;

use crate::models::User;
use anyhow::{Result, anyhow, bail};
use rusqlite::Connection;

/// Resolves the global `--user`/`--password` pair to a stored account.
pub fn login(conn: &Connection, m: &clap::ArgMatches) -> Result<User> {
    let (Some(username), Some(password)) = (
        m.get_one::<String>("user"),
        m.get_one::<String>("password"),
    ) else {
        bail!("Log in with --user <USERNAME> and --password <PASSWORD> (or PENNYWISE_PASSWORD)");
    };
    crate::users::authenticate(conn, username, password)?
        .ok_or_else(|| anyhow!("Invalid username or password"))
}
