// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Template rendering.
//!
//! ```text
//! engine   Renderer (handlebars, strict)
//!          process_string(src, vars)
//!          fill_args(cmd, dir, vars)  --> (cmd, dir)
//! files    TemplateProcessor { dir, suffix, force }
//!          find_template_files(dir)   --> ["a.tmpl", ...]
//!          process_template(dir, name, vars, force)
//! ```

pub mod engine;
pub mod files;


pub use engine::{Renderer, fill_args, first_value, joined_values, process_string};
pub use files::{TEMPLATE_SUFFIX, TemplateProcessor, find_template_files, process_template};
