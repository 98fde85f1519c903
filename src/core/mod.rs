// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules: variables, templates and the target process.
//!
//! ```text
//!                 core
//!                  |
//!       +----------+----------+
//!       |          |          |
//!       v          v          v
//!     vars     template    process
//!       |          |          |
//!   VarTable   Renderer    CommandSpec
//!   link URLs  E / J       supervise
//!              *.tmpl      signal relay
//! ```

pub mod process;
pub mod template;
pub mod vars;

#[cfg(test)]
pub(crate) mod test_utils;
