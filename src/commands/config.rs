// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings;
use crate::storage::KeyValueStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: KeyValueStore>(storage: &mut S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let s = settings::load(storage)?;
            println!(
                "{}",
                pretty_table(&["Setting", "Value"], vec![vec!["currency".into(), s.currency]])
            );
        }
        Some(("currency", sub)) => {
            let code = sub
                .get_one::<String>("CODE")
                .map(String::as_str)
                .unwrap_or_default();
            let set = settings::set_currency(storage, code)?;
            println!("Display currency set to {}", set);
        }
        _ => {}
    }
    Ok(())
}
