// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .help("Month as YYYY-MM (defaults to the current month)")
}

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn optional(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

pub fn build_cli() -> Command {
    Command::new("budgetbook")
        .version(clap::crate_version!())
        .about("Monthly income, spending, budgets, fixed costs and savings goals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path of the SQLite storage file"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path of a TOML configuration file"),
        )
        .subcommand(Command::new("init").about("Create the storage and seed the ledger"))
        .subcommand(
            Command::new("months")
                .about("List selectable months, newest first")
                .args(json_args()),
        )
        .subcommand(
            Command::new("income")
                .about("Income entries per month")
                .subcommand(
                    Command::new("add")
                        .arg(month_arg())
                        .arg(optional("source", "Income source (defaults to 'Income')"))
                        .arg(required("amount", "Amount received")),
                )
                .subcommand(Command::new("list").arg(month_arg()).args(json_args()))
                .subcommand(
                    Command::new("rm")
                        .arg(month_arg())
                        .arg(required("id", "Income entry id")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Spending and fixed-cost transactions")
                .subcommand(
                    Command::new("add")
                        .arg(optional("date", "Date as YYYY-MM-DD (defaults to today)"))
                        .arg(required("amount", "Amount spent"))
                        .arg(optional("category", "Spending category"))
                        .arg(optional("description", "Free text"))
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .action(ArgAction::SetTrue)
                                .help("Record as a fixed cost instead of spending"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(required("id", "Transaction id"))
                        .arg(optional("amount", "New amount"))
                        .arg(optional("date", "New date"))
                        .arg(optional("category", "New category"))
                        .arg(optional("description", "New description"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["spending", "fixed"])
                                .help("New transaction type"),
                        ),
                )
                .subcommand(Command::new("rm").arg(required("id", "Transaction id")))
                .subcommand(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(optional("category", "Only this category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most this many rows"),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("day")
                        .about("Transactions booked on one day")
                        .arg(required("date", "Date as YYYY-MM-DD"))
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Category limits per month")
                .subcommand(
                    Command::new("set")
                        .arg(month_arg())
                        .arg(required("category", "Category"))
                        .arg(required("amount", "Limit")),
                )
                .subcommand(Command::new("list").arg(month_arg()).args(json_args()))
                .subcommand(
                    Command::new("status")
                        .about("Budget against spending per configured category")
                        .arg(month_arg())
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Goal name"))
                        .arg(required("target", "Target amount")),
                )
                .subcommand(
                    Command::new("fund")
                        .arg(required("id", "Goal id"))
                        .arg(required("amount", "Contribution")),
                )
                .subcommand(Command::new("rm").arg(required("id", "Goal id")))
                .subcommand(Command::new("list").args(json_args())),
        )
        .subcommand(
            Command::new("fixed")
                .about("Fixed-cost templates")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Template name"))
                        .arg(required("amount", "Amount")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(required("id", "Template id"))
                        .arg(optional("name", "New name"))
                        .arg(optional("amount", "New amount")),
                )
                .subcommand(Command::new("rm").arg(required("id", "Template id")))
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("record")
                        .about("Book a template as a fixed-cost transaction")
                        .arg(required("id", "Template id"))
                        .arg(optional("date", "Date as YYYY-MM-DD (defaults to today)")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived figures")
                .subcommand(Command::new("summary").arg(month_arg()).args(json_args()))
                .subcommand(Command::new("savings").args(json_args()))
                .subcommand(Command::new("breakdown").arg(month_arg()).args(json_args()))
                .subcommand(Command::new("calendar").arg(month_arg()).args(json_args())),
        )
        .subcommand(
            Command::new("export")
                .about("Write ledger data to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(required("out", "Output path")),
                )
                .subcommand(
                    Command::new("backup")
                        .about("Write the whole ledger document as JSON")
                        .arg(required("out", "Output path")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
