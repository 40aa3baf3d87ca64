// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stashbook::{cli, commands, db, store::RecordStore};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    init_logger(level);
    debug!("Log level set to {}", level);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Exiting with error: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let mut store = RecordStore::open(db::open_or_init(&path)?)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&mut store, sub)?,
        Some(("goal", sub)) => commands::savings::handle(&mut store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => commands::config::handle(store.storage_mut(), sub)?,
        Some(("doctor", _)) => commands::doctor::handle(store.storage())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logger(level: &str) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
