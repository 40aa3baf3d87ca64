// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

const SHORT_ID_LEN: usize = 8;
const BAR_WIDTH: usize = 20;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_pct(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..SHORT_ID_LEN].to_string()
}

/// Text progress bar for a percentage in 0..=100.
pub fn progress_bar(pct: &Decimal) -> String {
    let pct = (*pct).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (pct * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Match a full id or a unique prefix of one (hyphens optional).
/// `Ok(None)` when nothing matches; an error when the prefix is ambiguous.
pub fn resolve_id<I>(needle: &str, ids: I) -> Result<Option<Uuid>>
where
    I: IntoIterator<Item = Uuid>,
{
    let needle = needle.trim();
    if let Ok(id) = Uuid::parse_str(needle) {
        return Ok(Some(id));
    }
    let prefix: String = needle
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_lowercase();
    if prefix.is_empty() {
        return Err(anyhow!("Empty id"));
    }
    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.simple().to_string().starts_with(&prefix))
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0])),
        n => Err(anyhow!("Id prefix '{}' is ambiguous ({} matches)", needle, n)),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
