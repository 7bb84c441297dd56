// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("cardbatch")
        .version(crate_version!())
        .about("Ingest card transaction files and report on accepted volume")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite datastore (default: $CARDBATCH_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (overridden by RUST_LOG)"),
        )
        .subcommand(
            Command::new("import")
                .about("Process a transaction file, replacing the current dataset")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .required(true)
                        .help("CSV, JSON, or XML file"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("MIME")
                        .help("Declared type, e.g. text/csv (default: from the file extension)"),
                )
                .arg(
                    Arg::new("skip_luhn")
                        .long("skip-luhn")
                        .action(ArgAction::SetTrue)
                        .help("Do not enforce the card number checksum"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the result as JSON"),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries over accepted transactions")
                .subcommand(output_flags(
                    Command::new("by-card-type").about("Volume per card network"),
                ))
                .subcommand(output_flags(Command::new("by-day").about("Volume per UTC day")))
                .subcommand(output_flags(
                    Command::new("by-card").about("Volume per card number, largest first"),
                ))
                .subcommand(output_flags(
                    Command::new("rejected").about("Rejected records, most recent first"),
                )),
        )
        .subcommand(Command::new("reset").about("Delete all accepted and rejected records"))
}
