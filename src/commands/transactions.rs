// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::input::TransactionForm;
use crate::models::{SUGGESTED_CATEGORIES, Transaction, TransactionType};
use crate::settings::get_currency;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, resolve_id, short_id, today};
use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

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
    let form = TransactionForm {
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        category: sub.get_one::<String>("category").cloned(),
        kind: sub.get_one::<String>("type").cloned(),
        date: sub.get_one::<String>("date").cloned(),
    };
    let tx = form.into_record(today())?;
    if !SUGGESTED_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(&tx.category))
    {
        debug!(category = %tx.category, "using a custom category");
    }
    let ccy = get_currency(store.storage())?;
    let line = format!(
        "Recorded {} {} '{}' ({}) on {} [{}]",
        tx.kind,
        fmt_money(&tx.amount, &ccy),
        tx.description,
        tx.category,
        tx.date,
        short_id(&tx.id)
    );
    info!(id = %tx.id, "adding transaction");
    store.add_transaction(tx)?;
    println!("{}", line);
    Ok(())
}

fn list<S: KeyValueStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store.transactions(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency(store.storage())?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                let signed = match t.kind {
                    TransactionType::Income => t.amount,
                    TransactionType::Expense => -t.amount,
                };
                vec![
                    short_id(&t.id),
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    t.kind.to_string(),
                    fmt_money(&signed, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Type", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove<S: KeyValueStore>(store: &mut RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let needle = sub.get_one::<String>("ID").map(String::as_str).unwrap_or_default();
    let ids: Vec<_> = store.transactions().iter().map(|t| t.id).collect();
    let Some(id) = resolve_id(needle, ids)? else {
        println!("No transaction matches '{}'", needle.trim());
        return Ok(());
    };
    let removed = store.delete_transaction(id)?;
    if removed == 0 {
        println!("No transaction matches '{}'", needle.trim());
    } else {
        println!("Deleted transaction {}", short_id(&id));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: uuid::Uuid,
    pub date: chrono::NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: rust_decimal::Decimal,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date,
            description: t.description.clone(),
            category: t.category.clone(),
            kind: t.kind,
            amount: t.amount,
        }
    }
}

/// Filtered view of the collection, newest first.
pub fn query_rows(
    transactions: &[Transaction],
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    Ok(transactions
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .take(limit)
        .map(TransactionRow::from)
        .collect())
}
