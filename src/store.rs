// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The record store: three collections loaded once from a [`KeyValueStore`]
//! and written back in full after every mutation.

use crate::error::StoreError;
use crate::models::{Investment, Record, SavingsGoal, Transaction};
use crate::storage::KeyValueStore;
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Outcome of reading one collection's blob, kept apart from the collection
/// itself so diagnostics can tell absent data from discarded data.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Absent,
    Loaded(Vec<T>),
    Malformed(String),
}

impl<T> LoadOutcome<T> {
    pub fn into_records(self) -> Vec<T> {
        match self {
            LoadOutcome::Loaded(v) => v,
            LoadOutcome::Absent | LoadOutcome::Malformed(_) => Vec::new(),
        }
    }
}

/// Parse and validate a stored blob. Never fails; problems are reported in the outcome.
pub fn decode_collection<T: Record>(raw: Option<&str>) -> LoadOutcome<T> {
    let Some(raw) = raw else {
        return LoadOutcome::Absent;
    };
    let records: Vec<T> = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => return LoadOutcome::Malformed(e.to_string()),
    };
    let mut seen = HashSet::with_capacity(records.len());
    for (idx, r) in records.iter().enumerate() {
        if let Err(e) = r.validate() {
            return LoadOutcome::Malformed(format!("record {}: {}", idx, e));
        }
        if !seen.insert(r.id()) {
            return LoadOutcome::Malformed(format!("duplicate id {}", r.id()));
        }
    }
    LoadOutcome::Loaded(records)
}

pub fn load_collection<T: Record, S: KeyValueStore>(storage: &S) -> Result<Vec<T>, StoreError> {
    let raw = storage.get(T::KEY).map_err(|source| StoreError::Read {
        key: T::KEY,
        source,
    })?;
    let records = match decode_collection::<T>(raw.as_deref()) {
        LoadOutcome::Absent => {
            debug!(key = T::KEY, "no stored {}", T::LABEL);
            Vec::new()
        }
        LoadOutcome::Loaded(v) => {
            debug!(key = T::KEY, count = v.len(), "loaded {}", T::LABEL);
            v
        }
        LoadOutcome::Malformed(reason) => {
            warn!(key = T::KEY, %reason, "discarding malformed {}", T::LABEL);
            Vec::new()
        }
    };
    Ok(records)
}

fn persist<T: Record, S: KeyValueStore>(storage: &mut S, records: &[T]) -> Result<(), StoreError> {
    let blob = serde_json::to_string(records).map_err(|source| StoreError::Serialize {
        label: T::LABEL,
        source,
    })?;
    storage.set(T::KEY, &blob).map_err(|source| StoreError::Storage {
        label: T::LABEL,
        source,
    })?;
    debug!(key = T::KEY, count = records.len(), "persisted {}", T::LABEL);
    Ok(())
}

fn prepend<T: Record>(existing: &[T], record: T) -> Vec<T> {
    let mut next = Vec::with_capacity(existing.len() + 1);
    next.push(record);
    next.extend_from_slice(existing);
    next
}

fn without<T: Record>(existing: &[T], id: Uuid) -> Vec<T> {
    existing.iter().filter(|r| r.id() != id).cloned().collect()
}

/// Owned store of the three collections. Collections are listed newest first.
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    transactions: Vec<Transaction>,
    investments: Vec<Investment>,
    savings: Vec<SavingsGoal>,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let mut store = Self {
            storage,
            transactions: Vec::new(),
            investments: Vec::new(),
            savings: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read all collections from storage, discarding in-memory state.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.transactions = load_collection(&self.storage)?;
        self.investments = load_collection(&self.storage)?;
        self.savings = load_collection(&self.storage)?;
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn savings(&self) -> &[SavingsGoal] {
        &self.savings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // Memory is replaced before the write; a failed write leaves it ahead of storage.
    fn save_transactions(&mut self, data: Vec<Transaction>) -> Result<(), StoreError> {
        self.transactions = data;
        persist(&mut self.storage, &self.transactions)
    }

    fn save_investments(&mut self, data: Vec<Investment>) -> Result<(), StoreError> {
        self.investments = data;
        persist(&mut self.storage, &self.investments)
    }

    fn save_savings(&mut self, data: Vec<SavingsGoal>) -> Result<(), StoreError> {
        self.savings = data;
        persist(&mut self.storage, &self.savings)
    }

    pub fn add_transaction(&mut self, record: Transaction) -> Result<(), StoreError> {
        let next = prepend(&self.transactions, record);
        self.save_transactions(next)
    }

    /// Remove every transaction with `id`. Returns how many were removed.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<usize, StoreError> {
        let next = without(&self.transactions, id);
        let removed = self.transactions.len() - next.len();
        self.save_transactions(next)?;
        Ok(removed)
    }

    pub fn add_investment(&mut self, record: Investment) -> Result<(), StoreError> {
        let next = prepend(&self.investments, record);
        self.save_investments(next)
    }

    pub fn delete_investment(&mut self, id: Uuid) -> Result<usize, StoreError> {
        let next = without(&self.investments, id);
        let removed = self.investments.len() - next.len();
        self.save_investments(next)?;
        Ok(removed)
    }

    pub fn add_saving(&mut self, record: SavingsGoal) -> Result<(), StoreError> {
        let next = prepend(&self.savings, record);
        self.save_savings(next)
    }

    pub fn delete_saving(&mut self, id: Uuid) -> Result<usize, StoreError> {
        let next = without(&self.savings, id);
        let removed = self.savings.len() - next.len();
        self.save_savings(next)?;
        Ok(removed)
    }
}
