// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::input::InvestmentForm;
use crate::settings::get_currency;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;
use crate::summary::investment_return_pct;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table, resolve_id, short_id};
use anyhow::Result;
use tracing::info;

pub fn handle<S: KeyValueStore>(store: &mut RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: KeyValueStore>(store: &mut RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let inv = InvestmentForm {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        kind: sub.get_one::<String>("type").cloned(),
        current_value: sub.get_one::<String>("current-value").cloned(),
    }
    .into_record()?;
    let ccy = get_currency(store.storage())?;
    let line = format!(
        "Added {} '{}': invested {}, now {} [{}]",
        inv.kind,
        inv.name,
        fmt_money(&inv.amount, &ccy),
        fmt_money(&inv.current_value, &ccy),
        short_id(&inv.id)
    );
    info!(id = %inv.id, "adding investment");
    store.add_investment(inv)?;
    println!("{}", line);
    Ok(())
}

fn list<S: KeyValueStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let investments = store.investments();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &investments)? {
        return Ok(());
    }
    let ccy = get_currency(store.storage())?;
    let rows = investments
        .iter()
        .map(|i| {
            vec![
                short_id(&i.id),
                i.name.clone(),
                i.kind.to_string(),
                fmt_money(&i.amount, &ccy),
                fmt_money(&i.current_value, &ccy),
                fmt_pct(&investment_return_pct(i)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Name", "Type", "Invested", "Current", "Return"],
            rows
        )
    );
    Ok(())
}

fn remove<S: KeyValueStore>(store: &mut RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let needle = sub.get_one::<String>("ID").map(String::as_str).unwrap_or_default();
    let ids: Vec<_> = store.investments().iter().map(|i| i.id).collect();
    let removed = match resolve_id(needle, ids)? {
        Some(id) => store.delete_investment(id)?,
        None => 0,
    };
    if removed == 0 {
        println!("No investment matches '{}'", needle.trim());
    } else {
        println!("Deleted investment '{}'", needle.trim());
    }
    Ok(())
}
