// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-valued variable table.
//!
//! ```text
//! VarTable: BTreeMap<String, Vec<String>>
//!   key order   lexicographic (deterministic derivation + env output)
//!   value order insertion, first = primary
//!   add_new()   appends only values not yet present for that key
//! ```

use std::collections::BTreeMap;

use tracing::trace;

/// Mapping from variable name to an ordered, deduplicated list of values.
///
/// The first value of a key is its primary value. Built once per run and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarTable {
    vars: BTreeMap<String, Vec<String>>,
}

impl VarTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Builds a table from raw `NAME=VALUE` entries.
    ///
    /// Each entry is split on its first `=`. Repeated names collect their
    /// distinct values in arrival order. Entries without `=` or with an empty
    /// name are skipped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    table.add_new(name, value);
                }
                _ => trace!(entry = %entry, "skipping malformed environment entry"),
            }
        }
        table
    }

    /// Appends `value` to `key` unless the key already holds that value.
    ///
    /// Returns `true` if the value was added.
    pub fn add_new(&mut self, key: &str, value: &str) -> bool {
        let values = self.vars.entry(key.to_string()).or_default();
        if values.iter().any(|v| v == value) {
            return false;
        }
        values.push(value.to_string());
        true
    }

    /// Replaces the value list of `key`, dropping duplicate values.
    pub fn insert<I, S>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        self.vars.insert(key.into(), deduped);
        self
    }

    /// All values of `key`, primary first.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.vars.get(key).map(Vec::as_slice)
    }

    /// The primary (first) value of `key`.
    #[must_use]
    pub fn primary(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Flattens the table to `(NAME, VALUE)` pairs using primary values.
    ///
    /// Keys without any value are left out.
    #[must_use]
    pub fn to_env_pairs(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .filter_map(|(k, v)| v.first().map(|first| (k.clone(), first.clone())))
            .collect()
    }

    /// Flattens the table to `NAME=VALUE` strings using primary values.
    #[must_use]
    pub fn to_env_strings(&self) -> Vec<String> {
        self.to_env_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect()
    }
}
