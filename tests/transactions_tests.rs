// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use stashbook::models::TransactionType;
use stashbook::storage::MemoryStorage;
use stashbook::store::RecordStore;
use stashbook::utils::short_id;
use stashbook::{cli, commands::transactions};

fn run(store: &mut RecordStore<MemoryStorage>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["stashbook", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(store, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

fn setup() -> RecordStore<MemoryStorage> {
    let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
    for (i, (desc, kind, cat)) in [
        ("Pocket money", "income", "Salary"),
        ("Canteen", "expense", "Food"),
        ("Metro card", "expense", "Transport"),
    ]
    .into_iter()
    .enumerate()
    {
        let date = format!("2025-01-0{}", i + 1);
        run(
            &mut store,
            &[
                "add",
                "--description",
                desc,
                "--amount",
                "10",
                "--type",
                kind,
                "--category",
                cat,
                "--date",
                &date,
            ],
        )
        .unwrap();
    }
    store
}

#[test]
fn add_prepends_new_transactions() {
    let store = setup();
    let descs: Vec<_> = store
        .transactions()
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descs, ["Metro card", "Canteen", "Pocket money"]);
}

#[test]
fn add_rejects_non_numeric_amount() {
    let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
    let res = run(
        &mut store,
        &["add", "--description", "Books", "--amount", "ten"],
    );
    assert!(res.is_err());
    assert!(store.transactions().is_empty());
}

#[test]
fn list_limit_and_filters_respected() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from(["stashbook", "tx", "list", "--limit", "2"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let rows = transactions::query_rows(store.transactions(), list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-03");

    let matches =
        cli::build_cli().get_matches_from(["stashbook", "tx", "list", "--type", "expense"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let rows = transactions::query_rows(store.transactions(), list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.kind == TransactionType::Expense));
    assert_eq!(rows[0].amount, Decimal::from(10));
}

#[test]
fn rm_accepts_short_id_and_ignores_unknown() {
    let mut store = setup();
    let target = store.transactions()[1].id;
    run(&mut store, &["rm", &short_id(&target)]).unwrap();
    assert_eq!(store.transactions().len(), 2);
    assert!(store.transactions().iter().all(|t| t.id != target));

    run(&mut store, &["rm", "ffffffffffff"]).unwrap();
    assert_eq!(store.transactions().len(), 2);
}
