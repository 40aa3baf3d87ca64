// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Investment, InvestmentType, SavingsGoal, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Sum that pins at `Decimal::MAX`/`Decimal::MIN` instead of panicking.
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn total_by_flow(transactions: &[Transaction], flow: TransactionType) -> Decimal {
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.kind == flow)
            .map(|t| t.amount),
    )
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    total_by_flow(transactions, TransactionType::Income)
}

pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    total_by_flow(transactions, TransactionType::Expense)
}

/// Principal put into all investments.
pub fn total_invested(investments: &[Investment]) -> Decimal {
    saturating_sum(investments.iter().map(|i| i.amount))
}

pub fn current_investment_value(investments: &[Investment]) -> Decimal {
    saturating_sum(investments.iter().map(|i| i.current_value))
}

/// Cash flow balance plus the present value of every investment.
pub fn net_worth(transactions: &[Transaction], investments: &[Investment]) -> Decimal {
    total_income(transactions)
        .saturating_sub(total_expenses(transactions))
        .saturating_add(current_investment_value(investments))
}

fn return_pct(invested: Decimal, current: Decimal) -> Decimal {
    if invested.is_zero() {
        return Decimal::ZERO;
    }
    let gain = current.saturating_sub(invested);
    gain.checked_div(invested)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(if gain.is_sign_negative() == invested.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Gain of one investment as a percentage of its principal; 0 when the principal is 0.
pub fn investment_return_pct(inv: &Investment) -> Decimal {
    return_pct(inv.amount, inv.current_value)
}

pub fn aggregate_return_pct(investments: &[Investment]) -> Decimal {
    return_pct(
        total_invested(investments),
        current_investment_value(investments),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEntry {
    pub kind: InvestmentType,
    pub value: Decimal,
    /// Percentage of the combined current value.
    pub share: Decimal,
}

/// Current value per investment type, in the order types first appear.
pub fn allocation(investments: &[Investment]) -> Vec<AllocationEntry> {
    let mut groups: Vec<AllocationEntry> = Vec::new();
    for inv in investments {
        match groups.iter_mut().find(|g| g.kind == inv.kind) {
            Some(g) => g.value = g.value.saturating_add(inv.current_value),
            None => groups.push(AllocationEntry {
                kind: inv.kind,
                value: inv.current_value,
                share: Decimal::ZERO,
            }),
        }
    }
    let total = saturating_sum(groups.iter().map(|g| g.value));
    if !total.is_zero() {
        for g in &mut groups {
            g.share = g
                .value
                .checked_div(total)
                .and_then(|ratio| ratio.checked_mul(HUNDRED))
                .unwrap_or(Decimal::ZERO);
        }
    }
    groups
}

/// `current / target` as a percentage, capped at 100.
pub fn goal_progress_pct(goal: &SavingsGoal) -> Decimal {
    if goal.is_complete() {
        return HUNDRED;
    }
    // Below target the ratio is under 1, so only a zero or negative target
    // can fail here; that reads as no progress.
    goal.current
        .checked_div(goal.target)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map_or(Decimal::ZERO, |pct| pct.min(HUNDRED))
}

pub fn completed_goal_count(goals: &[SavingsGoal]) -> usize {
    goals.iter().filter(|g| g.is_complete()).count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub spent: Decimal,
}

/// Expense totals per category, in the order categories first appear.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<CategorySpend> {
    let mut out: Vec<CategorySpend> = Vec::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
    {
        match out.iter_mut().find(|c| c.category == t.category) {
            Some(c) => c.spent = c.spent.saturating_add(t.amount),
            None => out.push(CategorySpend {
                category: t.category.clone(),
                spent: t.amount,
            }),
        }
    }
    out
}

/// Headline figures shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub net_worth: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_invested: Decimal,
    pub current_investment_value: Decimal,
    pub return_pct: Decimal,
    pub goal_count: usize,
    pub completed_goals: usize,
}

impl DashboardSummary {
    pub fn compute(
        transactions: &[Transaction],
        investments: &[Investment],
        savings: &[SavingsGoal],
    ) -> Self {
        Self {
            net_worth: net_worth(transactions, investments),
            total_income: total_income(transactions),
            total_expenses: total_expenses(transactions),
            total_invested: total_invested(investments),
            current_investment_value: current_investment_value(investments),
            return_pct: aggregate_return_pct(investments),
            goal_count: savings.len(),
            completed_goals: completed_goal_count(savings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn inv(kind: InvestmentType, amount: i64, current: i64) -> Investment {
        Investment {
            id: Uuid::new_v4(),
            name: format!("{} holding", kind),
            kind,
            amount: Decimal::from(amount),
            current_value: Decimal::from(current),
        }
    }

    fn tx(amount: i64, kind: TransactionType, category: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: "entry".into(),
            amount: Decimal::from(amount),
            category: category.into(),
            kind,
        }
    }

    fn goal(target: i64, current: i64) -> SavingsGoal {
        SavingsGoal {
            id: Uuid::new_v4(),
            name: "goal".into(),
            target: Decimal::from(target),
            current: Decimal::from(current),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }
    }

    #[test]
    fn allocation_groups_in_first_seen_order() {
        let invs = vec![
            inv(InvestmentType::Sip, 100, 100),
            inv(InvestmentType::Stock, 40, 50),
            inv(InvestmentType::Sip, 20, 20),
        ];
        let groups = allocation(&invs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, InvestmentType::Sip);
        assert_eq!(groups[0].value, Decimal::from(120));
        assert_eq!(groups[1].kind, InvestmentType::Stock);
        assert_eq!(groups[1].value, Decimal::from(50));
        assert_eq!(
            (groups[0].share + groups[1].share).round_dp(6),
            Decimal::from(100)
        );
    }

    #[test]
    fn allocation_of_worthless_holdings_has_zero_share() {
        let groups = allocation(&[inv(InvestmentType::Ppf, 0, 0)]);
        assert_eq!(groups[0].share, Decimal::ZERO);
    }

    #[test]
    fn return_is_zero_without_principal() {
        assert_eq!(
            investment_return_pct(&inv(InvestmentType::Fd, 0, 750)),
            Decimal::ZERO
        );
        assert_eq!(aggregate_return_pct(&[]), Decimal::ZERO);
    }

    #[test]
    fn return_is_relative_to_principal() {
        assert_eq!(
            investment_return_pct(&inv(InvestmentType::Stock, 200, 250)),
            Decimal::from(25)
        );
        let invs = vec![
            inv(InvestmentType::Stock, 100, 90),
            inv(InvestmentType::Sip, 100, 130),
        ];
        assert_eq!(aggregate_return_pct(&invs), Decimal::from(10));
    }

    #[test]
    fn goal_progress_is_clamped() {
        assert_eq!(goal_progress_pct(&goal(100, 150)), Decimal::from(100));
        assert_eq!(goal_progress_pct(&goal(200, 50)), Decimal::from(25));
    }

    #[test]
    fn complete_goal_reads_full_even_past_decimal_range() {
        let mut g = goal(0, 0);
        g.target = "0.5".parse().unwrap();
        g.current = Decimal::MAX;
        assert!(g.is_complete());
        assert_eq!(goal_progress_pct(&g), Decimal::from(100));

        let mut g = goal(1, 0);
        g.current = "1000000000000000000000000000".parse().unwrap();
        assert_eq!(goal_progress_pct(&g), Decimal::from(100));
    }

    #[test]
    fn zero_target_goal_is_complete() {
        assert_eq!(goal_progress_pct(&goal(0, 0)), Decimal::from(100));
    }

    #[test]
    fn oversized_return_saturates() {
        let mut holding = inv(InvestmentType::Stock, 0, 0);
        holding.amount = "0.0000000001".parse().unwrap();
        holding.current_value = "100000000000000000000".parse().unwrap();
        assert_eq!(investment_return_pct(&holding), Decimal::MAX);

        holding.current_value = Decimal::ZERO;
        assert_eq!(investment_return_pct(&holding), Decimal::from(-100));
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut a = inv(InvestmentType::Sip, 0, 0);
        a.amount = Decimal::MAX;
        a.current_value = Decimal::MAX;
        let b = a.clone();
        let invs = vec![a, b];
        assert_eq!(total_invested(&invs), Decimal::MAX);
        assert_eq!(current_investment_value(&invs), Decimal::MAX);
        assert_eq!(aggregate_return_pct(&invs), Decimal::ZERO);
        assert_eq!(allocation(&invs)[0].share, Decimal::from(100));

        let mut big = tx(0, TransactionType::Expense, "Rent");
        big.amount = Decimal::MAX;
        let txs = vec![big.clone(), big];
        assert_eq!(total_expenses(&txs), Decimal::MAX);
        assert_eq!(net_worth(&txs, &invs), Decimal::ZERO);
        assert_eq!(spending_by_category(&txs)[0].spent, Decimal::MAX);
    }

    #[test]
    fn completed_goals_count_reached_targets() {
        let goals = vec![goal(100, 100), goal(100, 99), goal(10, 40)];
        assert_eq!(completed_goal_count(&goals), 2);
    }

    #[test]
    fn net_worth_ignores_order() {
        let mut txs = vec![
            tx(1000, TransactionType::Income, "Salary"),
            tx(300, TransactionType::Expense, "Rent"),
            tx(45, TransactionType::Expense, "Food"),
        ];
        let mut invs = vec![
            inv(InvestmentType::Sip, 500, 520),
            inv(InvestmentType::Fd, 1000, 1070),
        ];
        let before = net_worth(&txs, &invs);
        txs.reverse();
        invs.reverse();
        assert_eq!(net_worth(&txs, &invs), before);
        assert_eq!(before, Decimal::from(1000 - 300 - 45 + 520 + 1070));
    }

    #[test]
    fn spending_groups_expenses_only() {
        let txs = vec![
            tx(120, TransactionType::Expense, "Food"),
            tx(5000, TransactionType::Income, "Salary"),
            tx(60, TransactionType::Expense, "Transport"),
            tx(30, TransactionType::Expense, "Food"),
        ];
        let spend = spending_by_category(&txs);
        assert_eq!(
            spend,
            vec![
                CategorySpend {
                    category: "Food".into(),
                    spent: Decimal::from(150)
                },
                CategorySpend {
                    category: "Transport".into(),
                    spent: Decimal::from(60)
                },
            ]
        );
    }

    #[test]
    fn dashboard_collects_headline_figures() {
        let txs = vec![tx(500, TransactionType::Expense, "Food")];
        let invs = vec![inv(InvestmentType::Sip, 1000, 1100)];
        let goals = vec![goal(100, 100), goal(500, 20)];
        let d = DashboardSummary::compute(&txs, &invs, &goals);
        assert_eq!(d.net_worth, Decimal::from(600));
        assert_eq!(d.total_expenses, Decimal::from(500));
        assert_eq!(d.return_pct, Decimal::from(10));
        assert_eq!(d.goal_count, 2);
        assert_eq!(d.completed_goals, 1);
    }
}
