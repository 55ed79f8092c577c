// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::users;
use crate::utils::pretty_table;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

/// `global` carries the top-level `--user`/`--password` values.
pub fn handle(conn: &Connection, global: &clap::ArgMatches, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let Some(password) = global.get_one::<String>("password") else {
                bail!("A password is required: pass --password or set PENNYWISE_PASSWORD");
            };
            let user = users::register(conn, username, password)?;
            println!("Registered '{}' (id {})", user.username, user.id);
        }
        Some(("passwd", sub)) => {
            let user = super::login(conn, global)?;
            let new = sub.get_one::<String>("new").unwrap();
            users::change_password(conn, user.id, new)
                .with_context(|| format!("Changing password for '{}'", user.username))?;
            println!("Password updated for '{}'", user.username);
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = users::list_users(conn)?
                .into_iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.username,
                        u.created_at.map(|c| c.to_string()).unwrap_or_default(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Id", "Username", "Created"], data));
        }
        _ => {}
    }
    Ok(())
}
