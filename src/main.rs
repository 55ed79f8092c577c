// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use pennywise::models::Kind;
use pennywise::store::SqliteStore;
use pennywise::{cli, commands, config, db};

fn main() -> Result<()> {
    config::init_tracing();
    let matches = cli::build_cli().get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let mut store =
        SqliteStore::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    let symbol = config::get_currency_symbol(store.conn())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("user", sub)) => commands::users::handle(store.conn(), &matches, sub)?,
        Some(("categories", sub)) => commands::categories::handle(sub)?,
        Some(("settings", sub)) => commands::settings::handle(store.conn(), sub)?,
        Some(("income", sub)) => {
            let user = commands::login(store.conn(), &matches)?;
            commands::records::handle(&mut store, &user, Kind::Income, &symbol, sub)?
        }
        Some(("expense", sub)) => {
            let user = commands::login(store.conn(), &matches)?;
            commands::records::handle(&mut store, &user, Kind::Expense, &symbol, sub)?
        }
        Some(("report", sub)) => {
            let user = commands::login(store.conn(), &matches)?;
            commands::reports::handle(&store, &user, &symbol, sub)?
        }
        Some(("guest", sub)) => commands::guest::handle(&symbol, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    store.close()?;
    Ok(())
}
