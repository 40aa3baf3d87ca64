// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::get_currency;
use crate::storage::KeyValueStore;
use crate::store::RecordStore;
use crate::summary::{
    AllocationEntry, CategorySpend, DashboardSummary, allocation, goal_progress_pct,
    spending_by_category,
};
use crate::utils::{fmt_money, fmt_pct, pretty_table, progress_bar};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    pub progress: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub currency: String,
    pub summary: DashboardSummary,
    pub allocation: Vec<AllocationEntry>,
    pub goals: Vec<GoalProgress>,
    pub spending: Vec<CategorySpend>,
}

/// Everything the dashboard shows, recomputed from the current collections.
pub fn build_report<S: KeyValueStore>(store: &RecordStore<S>) -> Result<DashboardReport> {
    let summary =
        DashboardSummary::compute(store.transactions(), store.investments(), store.savings());
    let goals = store
        .savings()
        .iter()
        .map(|g| GoalProgress {
            name: g.name.clone(),
            current: g.current,
            target: g.target,
            progress: goal_progress_pct(g),
        })
        .collect();
    Ok(DashboardReport {
        currency: get_currency(store.storage())?,
        summary,
        allocation: allocation(store.investments()),
        goals,
        spending: spending_by_category(store.transactions()),
    })
}

pub fn handle<S: KeyValueStore>(store: &RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    let report = build_report(store)?;
    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    let ccy = report.currency.as_str();
    let s = &report.summary;

    println!(
        "{}",
        pretty_table(
            &["Net Worth", "Invested (now)", "Returns", "Expenses", "Income", "Goals"],
            vec![vec![
                fmt_money(&s.net_worth, ccy),
                fmt_money(&s.current_investment_value, ccy),
                fmt_pct(&s.return_pct),
                fmt_money(&s.total_expenses, ccy),
                fmt_money(&s.total_income, ccy),
                format!("{} ({} completed)", s.goal_count, s.completed_goals),
            ]],
        )
    );

    if report.allocation.is_empty() {
        println!("No investment data to display");
    } else {
        let rows = report
            .allocation
            .iter()
            .map(|a| {
                vec![
                    a.kind.to_string(),
                    fmt_money(&a.value, ccy),
                    fmt_pct(&a.share),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Type", "Value", "Share"], rows));
    }

    if report.goals.is_empty() {
        println!("No goals set yet");
    } else {
        let rows = report
            .goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    format!("{} / {}", fmt_money(&g.current, ccy), fmt_money(&g.target, ccy)),
                    format!("{} {}", progress_bar(&g.progress), fmt_pct(&g.progress)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Saved", "Progress"], rows));
    }

    if !report.spending.is_empty() {
        let rows = report
            .spending
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.spent, ccy)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}
