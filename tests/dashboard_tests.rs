// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use stashbook::commands::{config, dashboard, doctor, investments, savings};
use stashbook::models::{INVESTMENTS_KEY, InvestmentType};
use stashbook::storage::MemoryStorage;
use stashbook::store::RecordStore;
use stashbook::{cli, settings};

fn dispatch(store: &mut RecordStore<MemoryStorage>, argv: &[&str]) {
    let mut full = vec!["stashbook"];
    full.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some(("invest", m)) => investments::handle(store, m).unwrap(),
        Some(("goal", m)) => savings::handle(store, m).unwrap(),
        Some(("config", m)) => config::handle(store.storage_mut(), m).unwrap(),
        Some(("dashboard", m)) => dashboard::handle(store, m).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn dashboard_report_groups_allocation() {
    let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
    dispatch(
        &mut store,
        &["invest", "add", "--name", "Nifty SIP", "--amount", "100", "--type", "SIP"],
    );
    dispatch(
        &mut store,
        &[
            "invest", "add", "--name", "Infosys", "--amount", "40", "--type", "Stock",
            "--current-value", "50",
        ],
    );
    dispatch(
        &mut store,
        &["invest", "add", "--name", "Top-up SIP", "--amount", "20", "--type", "sip"],
    );

    let report = dashboard::build_report(&store).unwrap();
    let groups: Vec<_> = report
        .allocation
        .iter()
        .map(|a| (a.kind, a.value))
        .collect();
    assert_eq!(
        groups,
        vec![
            (InvestmentType::Sip, Decimal::from(120)),
            (InvestmentType::Stock, Decimal::from(50)),
        ]
    );
    assert_eq!(report.summary.total_invested, Decimal::from(160));
    assert_eq!(report.summary.current_investment_value, Decimal::from(170));
    assert_eq!(report.summary.net_worth, Decimal::from(170));
    assert_eq!(report.currency, "INR");

    dispatch(&mut store, &["dashboard"]);
}

#[test]
fn goal_progress_is_clamped_in_report() {
    let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
    dispatch(
        &mut store,
        &["goal", "add", "--name", "Cycle", "--target", "100", "--current", "150"],
    );
    dispatch(
        &mut store,
        &["goal", "add", "--name", "Laptop", "--target", "400", "--current", "100"],
    );

    let report = dashboard::build_report(&store).unwrap();
    assert_eq!(report.summary.goal_count, 2);
    assert_eq!(report.summary.completed_goals, 1);
    assert_eq!(report.goals[0].name, "Laptop");
    assert_eq!(report.goals[0].progress, Decimal::from(25));
    assert_eq!(report.goals[1].progress, Decimal::from(100));
}

#[test]
fn config_currency_flows_into_report() {
    let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
    dispatch(&mut store, &["config", "currency", "eur"]);
    assert_eq!(settings::get_currency(store.storage()).unwrap(), "EUR");
    assert_eq!(dashboard::build_report(&store).unwrap().currency, "EUR");
}

#[test]
fn doctor_reports_each_stored_key() {
    let storage = MemoryStorage::new().with_entry(INVESTMENTS_KEY, "[{]");
    let mut store = RecordStore::open(storage).unwrap();
    assert!(store.investments().is_empty());
    dispatch(
        &mut store,
        &["goal", "add", "--name", "Trip", "--target", "8000"],
    );

    let rows = doctor::diagnose(store.storage()).unwrap();
    let statuses: Vec<_> = rows.iter().map(|r| (r[0].as_str(), r[1].as_str())).collect();
    assert_eq!(
        statuses,
        vec![
            ("finance_transactions", "absent"),
            ("finance_investments", "malformed"),
            ("finance_savings", "ok"),
            ("finance_settings", "absent"),
        ]
    );

    dispatch(&mut store, &["config", "currency", "usd"]);
    let rows = doctor::diagnose(store.storage()).unwrap();
    assert_eq!(rows[3][1], "ok");
    assert_eq!(rows[3][2], "currency USD");
}

#[test]
fn doctor_flags_malformed_settings() {
    let storage = MemoryStorage::new().with_entry(settings::SETTINGS_KEY, "not json");
    let store = RecordStore::open(storage).unwrap();
    assert_eq!(settings::get_currency(store.storage()).unwrap(), "INR");

    let rows = doctor::diagnose(store.storage()).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3][0], "finance_settings");
    assert_eq!(rows[3][1], "malformed");
    assert!(rows[3][2].starts_with("using defaults"));
}
