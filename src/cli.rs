// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Restrict to one calendar month")
}

fn records_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a new entry")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Defaults to today"),
                )
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List entries, most recent first")
                .arg(month_arg())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Update an entry; omitted fields keep their value")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(
            Command::new("rm").about("Delete an entry").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

pub fn build_cli() -> Command {
    Command::new("pennywise")
        .version(clap::crate_version!())
        .about("Personal income and expense tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("PENNYWISE_DB")
                .value_name("PATH")
                .help("SQLite database file"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .value_name("USERNAME"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .global(true)
                .env("PENNYWISE_PASSWORD")
                .hide_env_values(true),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Manage accounts")
                .subcommand_required(true)
                .subcommand(
                    Command::new("register")
                        .about("Create an account using --password")
                        .arg(Arg::new("username").required(true)),
                )
                .subcommand(
                    Command::new("passwd")
                        .about("Change the password of --user")
                        .arg(Arg::new("new").long("new").required(true)),
                )
                .subcommand(Command::new("list").about("List accounts")),
        )
        .subcommand(
            Command::new("categories").about("Show the category sets").arg(
                Arg::new("kind")
                    .long("kind")
                    .value_parser(["income", "expense"]),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Display preferences")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency").arg(Arg::new("symbol").required(true)),
                ),
        )
        .subcommand(records_cmd("income", "Manage incomes"))
        .subcommand(records_cmd("expense", "Manage expenses"))
        .subcommand(
            Command::new("report")
                .about("Totals, breakdowns and exports")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("dashboard")
                        .about("Totals and the three latest entries of each kind"),
                ))
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Income, expenses and savings")
                        .arg(month_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .about("Totals per category")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(month_arg()),
                ))
                .subcommand(
                    Command::new("chart")
                        .about("Income vs expenses bar chart")
                        .arg(month_arg())
                        .arg(
                            Arg::new("width")
                                .long("width")
                                .default_value("40")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("export")
                        .about("Write summary_<date>[_<YYYY-MM>].txt")
                        .arg(month_arg())
                        .arg(Arg::new("dir").long("dir").value_name("DIR")),
                ),
        )
        .subcommand(json_flags(
            Command::new("guest")
                .about("Summarise a CSV of entries without saving anything")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .required(true)
                        .help("CSV with columns kind,category,amount,date,notes"),
                )
                .arg(month_arg()),
        ))
}
