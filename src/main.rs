// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cardbatch::{cli, commands, db};

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cardbatch={}", level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let mut conn = match matches.get_one::<String>("db") {
        Some(path) => db::open_at(Path::new(path.trim()))?,
        None => db::open_or_init()?,
    };

    match matches.subcommand() {
        Some(("import", sub)) => {
            commands::importer::handle(&mut conn, sub)?;
        }
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("reset", _)) => commands::reset::handle(&mut conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
