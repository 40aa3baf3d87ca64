// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Investment, Record, SavingsGoal, Transaction};
use crate::settings::{SETTINGS_KEY, Settings};
use crate::storage::KeyValueStore;
use crate::store::{LoadOutcome, decode_collection};
use crate::utils::pretty_table;
use anyhow::{Context, Result};

fn inspect<T: Record, S: KeyValueStore>(storage: &S) -> Result<Vec<String>> {
    let raw = storage
        .get(T::KEY)
        .with_context(|| format!("Read {}", T::KEY))?;
    let (status, detail) = match decode_collection::<T>(raw.as_deref()) {
        LoadOutcome::Absent => ("absent".to_string(), "loads as empty".to_string()),
        LoadOutcome::Loaded(v) => ("ok".to_string(), format!("{} records", v.len())),
        LoadOutcome::Malformed(reason) => ("malformed".to_string(), reason),
    };
    Ok(vec![T::KEY.to_string(), status, detail])
}

fn inspect_settings<S: KeyValueStore>(storage: &S) -> Result<Vec<String>> {
    let raw = storage
        .get(SETTINGS_KEY)
        .with_context(|| format!("Read {}", SETTINGS_KEY))?;
    let (status, detail) = match raw.as_deref().map(serde_json::from_str::<Settings>) {
        None => ("absent".to_string(), "using defaults".to_string()),
        Some(Ok(s)) => ("ok".to_string(), format!("currency {}", s.currency)),
        Some(Err(e)) => ("malformed".to_string(), format!("using defaults: {}", e)),
    };
    Ok(vec![SETTINGS_KEY.to_string(), status, detail])
}

/// One row per stored key: key, status, detail.
pub fn diagnose<S: KeyValueStore>(storage: &S) -> Result<Vec<Vec<String>>> {
    Ok(vec![
        inspect::<Transaction, _>(storage)?,
        inspect::<Investment, _>(storage)?,
        inspect::<SavingsGoal, _>(storage)?,
        inspect_settings(storage)?,
    ])
}

pub fn handle<S: KeyValueStore>(storage: &S) -> Result<()> {
    let rows = diagnose(storage)?;
    if rows.iter().all(|r| r[1] != "malformed") {
        println!("✅ doctor: no issues found");
    }
    println!("{}", pretty_table(&["Key", "Status", "Detail"], rows));
    Ok(())
}
