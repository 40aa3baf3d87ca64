// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw form input and its conversion into records. All user-facing
//! validation happens here; the store accepts whatever it is given.

use crate::error::ValidationError;
use crate::models::{Investment, InvestmentType, SavingsGoal, Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

pub const DEFAULT_CATEGORY: &str = "Food";

fn text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(v.to_string())
}

fn decimal(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    v.parse::<Decimal>().map_err(|_| ValidationError::Number {
        field,
        value: v.to_string(),
    })
}

fn non_negative(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let d = decimal(field, raw)?;
    if d < Decimal::ZERO {
        return Err(ValidationError::Negative { field });
    }
    Ok(d)
}

fn optional<'a>(raw: Option<&'a str>) -> Option<&'a str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn date_or(
    field: &'static str,
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    match optional(raw) {
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::Date {
                field,
                value: s.to_string(),
            })
        }
        None => Ok(today),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub date: Option<String>,
}

impl TransactionForm {
    pub fn into_record(self, today: NaiveDate) -> Result<Transaction, ValidationError> {
        let description = text("description", &self.description)?;
        let amount = non_negative("amount", &self.amount)?;
        let kind = match optional(self.kind.as_deref()) {
            Some(s) => s.parse::<TransactionType>()?,
            None => TransactionType::Expense,
        };
        let category = optional(self.category.as_deref())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        let date = date_or("date", self.date.as_deref(), today)?;
        Ok(Transaction {
            id: Uuid::new_v4(),
            date,
            description,
            amount,
            category,
            kind,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvestmentForm {
    pub name: String,
    pub amount: String,
    pub kind: Option<String>,
    pub current_value: Option<String>,
}

impl InvestmentForm {
    pub fn into_record(self) -> Result<Investment, ValidationError> {
        let name = text("name", &self.name)?;
        let amount = non_negative("amount", &self.amount)?;
        let kind = match optional(self.kind.as_deref()) {
            Some(s) => s.parse::<InvestmentType>()?,
            None => InvestmentType::Sip,
        };
        let current_value = match optional(self.current_value.as_deref()) {
            Some(s) => non_negative("current value", s)?,
            None => amount,
        };
        Ok(Investment {
            id: Uuid::new_v4(),
            name,
            kind,
            amount,
            current_value,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SavingsGoalForm {
    pub name: String,
    pub target: String,
    pub current: Option<String>,
    pub deadline: Option<String>,
}

impl SavingsGoalForm {
    pub fn into_record(self, today: NaiveDate) -> Result<SavingsGoal, ValidationError> {
        let name = text("name", &self.name)?;
        let target = decimal("target", &self.target)?;
        if target <= Decimal::ZERO {
            return Err(ValidationError::NotPositive { field: "target" });
        }
        let current = match optional(self.current.as_deref()) {
            Some(s) => non_negative("current", s)?,
            None => Decimal::ZERO,
        };
        let deadline = date_or("deadline", self.deadline.as_deref(), today)?;
        Ok(SavingsGoal {
            id: Uuid::new_v4(),
            name,
            target,
            current,
            deadline,
        })
    }
}
