// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Link variable parsing.
//!
//! ```text
//! key    APP[_INDEX][_...]_PORT_<port>_TCP   --> LinkKey   { app, index, port }
//! value  <scheme>://<host>:<port>            --> LinkValue { scheme, host, port }
//!
//! derived  APP_URL, APP_<port>_URL = "http://<host>:<port>"
//! ```

use regex::Regex;
use std::sync::LazyLock;

static LINK_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^_]+)(?:_([0-9]+))?_(?:.*_)?PORT_([0-9]+)_TCP$")
        .unwrap_or_else(|e| unreachable!("link key pattern is valid: {e}"))
});

static LINK_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*)://(.+):([0-9]+)$")
        .unwrap_or_else(|e| unreachable!("link value pattern is valid: {e}"))
});

/// Identity of a linked service, parsed from a variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkKey {
    pub app: String,
    /// Instance number as written in the name, if any.
    pub index: Option<String>,
    pub port: u16,
}

impl LinkKey {
    /// Parses a variable name such as `ES_1_PORT_9200_TCP`.
    ///
    /// Returns `None` for names that are not link variables, including ports
    /// outside the `u16` range.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let caps = LINK_KEY.captures(key)?;
        let index = caps.get(2).map(|m| m.as_str().to_string());
        Some(Self {
            app: caps[1].to_string(),
            index,
            port: caps[3].parse().ok()?,
        })
    }

    /// `APP_URL`
    #[must_use]
    pub fn url_key(&self) -> String {
        format!("{}_URL", self.app)
    }

    /// `APP_<port>_URL`
    #[must_use]
    pub fn port_url_key(&self) -> String {
        format!("{}_{}_URL", self.app, self.port)
    }
}

/// Reachable address of a linked service, parsed from a variable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkValue {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl LinkValue {
    /// Parses a value such as `tcp://172.17.0.63:9200`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let caps = LINK_VALUE.captures(value)?;
        Some(Self {
            scheme: caps[1].to_string(),
            host: caps[2].to_string(),
            port: caps[3].parse().ok()?,
        })
    }

    /// The derived URL; the original scheme is always replaced by `http`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
