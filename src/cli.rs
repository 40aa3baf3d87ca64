// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, command, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(--jsonl "Print one JSON object per line")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

fn rm_cmd(what: &str) -> Command {
    Command::new("rm")
        .about(format!("Delete a {} by id or unique id prefix", what))
        .arg(arg!(<ID> "Record id or prefix"))
}

pub fn build_cli() -> Command {
    command!()
        .about("Track student income, expenses, investments, and savings goals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("STASHBOOK_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the database file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .env("STASHBOOK_LOG")
                .default_value("warn")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .help("Log verbosity (RUST_LOG takes precedence)"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(arg!(--description <TEXT> "What it was for").required(true))
                        .arg(arg!(--amount <AMOUNT> "Amount (non-negative)").required(true))
                        .arg(
                            arg!(--"type" <TYPE> "income or expense")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(arg!(--category <CATEGORY> "Category, e.g. Food, Transport, Rent"))
                        .arg(arg!(--date <DATE> "Date YYYY-MM-DD (default today)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(
                            arg!(--"type" <TYPE> "Only income or expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(arg!(--category <CATEGORY> "Only this category"))
                        .arg(
                            arg!(--limit <N> "Show at most N rows")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(rm_cmd("transaction")),
        )
        .subcommand(
            Command::new("invest")
                .about("Investments")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Log an investment")
                        .arg(arg!(--name <NAME> "Investment name").required(true))
                        .arg(arg!(--amount <AMOUNT> "Principal invested").required(true))
                        .arg(
                            arg!(--"type" <TYPE> "FD, PPF, SIP, Stock or \"Mutual Fund\"")
                                .default_value("SIP"),
                        )
                        .arg(arg!(--"current-value" <VALUE> "Present value (default: amount)")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List investments, newest first"),
                ))
                .subcommand(rm_cmd("investment")),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Set a savings goal")
                        .arg(arg!(--name <NAME> "Goal name").required(true))
                        .arg(arg!(--target <AMOUNT> "Target amount").required(true))
                        .arg(arg!(--current <AMOUNT> "Saved so far (default 0)"))
                        .arg(arg!(--deadline <DATE> "Target date YYYY-MM-DD (default today)")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List savings goals with progress"),
                ))
                .subcommand(rm_cmd("savings goal")),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Net worth, allocation, and goal progress")
                .arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("export")
                .about("Export a collection to CSV or JSON")
                .arg(
                    arg!(<COLLECTION> "What to export")
                        .value_parser(["transactions", "investments", "savings"]),
                )
                .arg(arg!(--format <FORMAT> "csv or json").default_value("csv"))
                .arg(arg!(--out <PATH> "Output file").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print current settings"))
                .subcommand(
                    Command::new("currency")
                        .about("Set the display currency")
                        .arg(arg!(<CODE> "Three-letter currency code")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
