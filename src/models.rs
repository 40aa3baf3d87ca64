// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const TRANSACTIONS_KEY: &str = "finance_transactions";
pub const INVESTMENTS_KEY: &str = "finance_investments";
pub const SAVINGS_KEY: &str = "finance_savings";

/// Categories offered when recording a transaction. Not enforced.
pub const SUGGESTED_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Education",
    "Rent",
    "Shopping",
    "Salary",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ValidationError::Choice {
                field: "type",
                value: s.to_string(),
                expected: "income, expense".into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    #[serde(rename = "FD")]
    Fd,
    #[serde(rename = "PPF")]
    Ppf,
    #[serde(rename = "SIP")]
    Sip,
    Stock,
    #[serde(rename = "Mutual Fund")]
    MutualFund,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 5] = [
        InvestmentType::Fd,
        InvestmentType::Ppf,
        InvestmentType::Sip,
        InvestmentType::Stock,
        InvestmentType::MutualFund,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::Fd => "FD",
            InvestmentType::Ppf => "PPF",
            InvestmentType::Sip => "SIP",
            InvestmentType::Stock => "Stock",
            InvestmentType::MutualFund => "Mutual Fund",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match norm.as_str() {
            "fd" => Ok(InvestmentType::Fd),
            "ppf" => Ok(InvestmentType::Ppf),
            "sip" => Ok(InvestmentType::Sip),
            "stock" => Ok(InvestmentType::Stock),
            "mutualfund" | "mf" => Ok(InvestmentType::MutualFund),
            _ => Err(ValidationError::Choice {
                field: "investment type",
                value: s.to_string(),
                expected: InvestmentType::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub amount: Decimal,
    pub current_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub deadline: NaiveDate,
}

impl SavingsGoal {
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

/// A record kind persisted as one collection under a fixed storage key.
pub trait Record: Serialize + for<'de> Deserialize<'de> + Clone {
    const KEY: &'static str;
    const LABEL: &'static str;

    fn id(&self) -> Uuid;

    /// Shape checks applied to stored records before they are admitted.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

impl Record for Transaction {
    const KEY: &'static str = TRANSACTIONS_KEY;
    const LABEL: &'static str = "transactions";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("description", &self.description)?;
        require_non_negative("amount", self.amount)
    }
}

impl Record for Investment {
    const KEY: &'static str = INVESTMENTS_KEY;
    const LABEL: &'static str = "investments";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_non_negative("amount", self.amount)?;
        require_non_negative("current value", self.current_value)
    }
}

impl Record for SavingsGoal {
    const KEY: &'static str = SAVINGS_KEY;
    const LABEL: &'static str = "savings goals";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.target <= Decimal::ZERO {
            return Err(ValidationError::NotPositive { field: "target" });
        }
        require_non_negative("current", self.current)
    }
}
