// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment to variable table extension.
//!
//! # Architecture
//!
//! ```text
//! raw "NAME=VALUE" entries
//!        |
//!        v
//! VarTable::from_entries()      split on first '=', dedup values
//!        |
//!        v
//! for key in sorted keys:
//!   LinkKey::parse(key)         not a link --> skip
//!   LinkValue::parse(primary)   invalid    --> warn, skip
//!   add_new(APP_URL, url)
//!   add_new(APP_<port>_URL, url)
//!        |
//!        v
//! "use:" summary per derived key that gained a value
//! ```
//!
//! Derived values are only ever appended, so a variable that was already in
//! the environment keeps its own value as the primary one.

pub mod link;
pub mod table;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use link::{LinkKey, LinkValue};
use table::VarTable;

/// Captures the current process environment as raw `NAME=VALUE` entries.
///
/// Non-UTF-8 names or values are converted lossily.
#[must_use]
pub fn raw_environment() -> Vec<String> {
    std::env::vars_os()
        .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
        .collect()
}

/// Builds the variable table from raw entries and derives URL variables
/// from docker-style link variables.
pub fn extend_variables<I, S>(entries: I) -> VarTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vars = VarTable::from_entries(entries);

    let keys: Vec<String> = vars.keys().map(str::to_owned).collect();
    let mut derived = BTreeSet::new();

    for key in &keys {
        let Some(link) = LinkKey::parse(key) else {
            continue;
        };
        let Some(value) = vars.primary(key) else {
            continue;
        };

        debug!(key = %key, value = %value, "found link variable");

        let Some(target) = LinkValue::parse(value) else {
            warn!(key = %key, value = %value, "found invalid link value");
            continue;
        };

        let url = target.url();
        for name in [link.url_key(), link.port_url_key()] {
            if vars.add_new(&name, &url) {
                derived.insert(name);
            }
        }
    }

    for name in &derived {
        let values = vars.get(name).unwrap_or_default();
        info!(key = %name, values = ?values, "use:");
    }

    vars
}

/// Reads the current process environment and extends it.
#[must_use]
pub fn read_extended_variables() -> VarTable {
    extend_variables(raw_environment())
}
