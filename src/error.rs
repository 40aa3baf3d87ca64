// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure of the durable key-value backend itself.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to persist {label}: {source}")]
    Storage {
        label: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("failed to serialize {label}: {source}")]
    Serialize {
        label: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {key}: {source}")]
    Read {
        key: &'static str,
        #[source]
        source: StorageError,
    },
}

/// Rejection of user input at the form boundary, or of a stored record at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("invalid number '{value}' for {field}")]
    Number { field: &'static str, value: String },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("invalid date '{value}' for {field}, expected YYYY-MM-DD")]
    Date { field: &'static str, value: String },
    #[error("unknown {field} '{value}' (expected one of: {expected})")]
    Choice {
        field: &'static str,
        value: String,
        expected: String,
    },
}
