// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::storage::KeyValueStore;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SETTINGS_KEY: &str = "finance_settings";
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Stored settings, or defaults when absent or unreadable.
pub fn load<S: KeyValueStore>(storage: &S) -> Result<Settings> {
    let raw = storage.get(SETTINGS_KEY).context("Read settings")?;
    let Some(raw) = raw else {
        return Ok(Settings::default());
    };
    match serde_json::from_str::<Settings>(&raw) {
        Ok(s) => Ok(s),
        Err(e) => {
            warn!(key = SETTINGS_KEY, error = %e, "ignoring malformed settings");
            Ok(Settings::default())
        }
    }
}

pub fn save<S: KeyValueStore>(storage: &mut S, settings: &Settings) -> Result<()> {
    let blob = serde_json::to_string(settings)?;
    storage
        .set(SETTINGS_KEY, &blob)
        .context("Write settings")?;
    Ok(())
}

pub fn get_currency<S: KeyValueStore>(storage: &S) -> Result<String> {
    Ok(load(storage)?.currency)
}

pub fn set_currency<S: KeyValueStore>(storage: &mut S, ccy: &str) -> Result<String> {
    let code = ccy.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("Invalid currency code '{}', expected three letters", ccy.trim());
    }
    let mut settings = load(storage)?;
    settings.currency = code.clone();
    save(storage, &settings)?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn currency_defaults_then_persists() {
        let mut s = MemoryStorage::new();
        assert_eq!(get_currency(&s).unwrap(), "INR");
        assert_eq!(set_currency(&mut s, " usd ").unwrap(), "USD");
        assert_eq!(get_currency(&s).unwrap(), "USD");
    }

    #[test]
    fn rejects_odd_codes() {
        let mut s = MemoryStorage::new();
        assert!(set_currency(&mut s, "dollars").is_err());
        assert!(set_currency(&mut s, "U5D").is_err());
    }

    #[test]
    fn malformed_settings_fall_back() {
        let s = MemoryStorage::new().with_entry(SETTINGS_KEY, "nope");
        assert_eq!(load(&s).unwrap(), Settings::default());
    }
}
