// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::storage::KeyValueStore;
use crate::store::RecordStore;
use anyhow::{Context, Result, bail};
use serde::Serialize;

pub fn handle<S: KeyValueStore>(store: &RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    let what = m
        .get_one::<String>("COLLECTION")
        .map(String::as_str)
        .unwrap_or("transactions");
    let fmt = m
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = m
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .context("Missing --out")?;

    let count = match what {
        "transactions" => write_records(store.transactions(), &fmt, &out)?,
        "investments" => write_records(store.investments(), &fmt, &out)?,
        "savings" => write_records(store.savings(), &fmt, &out)?,
        other => bail!("Unknown collection: {} (use transactions|investments|savings)", other),
    };
    println!("Exported {} {} to {}", count, what, out);
    Ok(())
}

fn write_records<T: Serialize>(records: &[T], fmt: &str, out: &str) -> Result<usize> {
    match fmt {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            for r in records {
                wtr.serialize(r)?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(records)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    Ok(records.len())
}
