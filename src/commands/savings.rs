// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::input::SavingsGoalForm;
use crate::models::SavingsGoal;
use crate::settings::get_currency;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;
use crate::summary::goal_progress_pct;
use crate::utils::{
    fmt_money, fmt_pct, maybe_print_json, pretty_table, progress_bar, resolve_id, short_id, today,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
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
    let goal = SavingsGoalForm {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        target: sub.get_one::<String>("target").cloned().unwrap_or_default(),
        current: sub.get_one::<String>("current").cloned(),
        deadline: sub.get_one::<String>("deadline").cloned(),
    }
    .into_record(today())?;
    let ccy = get_currency(store.storage())?;
    let line = format!(
        "Goal '{}' set: {} of {} by {} [{}]",
        goal.name,
        fmt_money(&goal.current, &ccy),
        fmt_money(&goal.target, &ccy),
        goal.deadline,
        short_id(&goal.id)
    );
    info!(id = %goal.id, "adding savings goal");
    store.add_saving(goal)?;
    println!("{}", line);
    Ok(())
}

#[derive(Debug, Serialize)]
struct GoalRow<'a> {
    #[serde(flatten)]
    goal: &'a SavingsGoal,
    progress: Decimal,
    complete: bool,
}

fn list<S: KeyValueStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<GoalRow<'_>> = store
        .savings()
        .iter()
        .map(|g| GoalRow {
            goal: g,
            progress: goal_progress_pct(g),
            complete: g.is_complete(),
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.storage())?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                short_id(&r.goal.id),
                r.goal.name.clone(),
                r.goal.deadline.to_string(),
                format!(
                    "{} / {}",
                    fmt_money(&r.goal.current, &ccy),
                    fmt_money(&r.goal.target, &ccy)
                ),
                format!("{} {}", progress_bar(&r.progress), fmt_pct(&r.progress)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Goal", "Deadline", "Saved", "Progress"], rows)
    );
    Ok(())
}

fn remove<S: KeyValueStore>(store: &mut RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let needle = sub.get_one::<String>("ID").map(String::as_str).unwrap_or_default();
    let ids: Vec<_> = store.savings().iter().map(|g| g.id).collect();
    let removed = match resolve_id(needle, ids)? {
        Some(id) => store.delete_saving(id)?,
        None => 0,
    };
    if removed == 0 {
        println!("No savings goal matches '{}'", needle.trim());
    } else {
        println!("Deleted savings goal '{}'", needle.trim());
    }
    Ok(())
}
