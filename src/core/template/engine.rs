// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Strict markup rendering against a [`VarTable`].
//!
//! ```text
//! Renderer::new(&vars)
//!   handlebars, strict mode, no HTML escaping
//!   helper E   {{E "KEY"}}        primary value or ""
//!   helper J   {{J "KEY" ["sep"]}} values joined (default ",") or ""
//!   data       {{KEY}}            primary value, absent key --> Unresolved
//!
//! compile(name, source) --> TemplateError::Parse
//! render(name, writer)  --> TemplateError::Unresolved / Render
//! ```
//!
//! Quoted keys in `E`/`J` are optional lookups. A bare key, either as
//! `{{KEY}}` or as `{{E KEY}}`, must exist in the table.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use serde_json::{Map, Value};
use tracing::error;

use crate::core::vars::table::VarTable;
use crate::error::{ArgumentKind, TemplateError};

const INLINE_TEMPLATE: &str = "inline";
const DEFAULT_SEPARATOR: &str = ",";

/// `E(key)`: first value of `key`, or `""` if the key is absent or empty.
#[must_use]
pub fn first_value<'a>(vars: &'a VarTable, key: &str) -> &'a str {
    vars.primary(key).unwrap_or_default()
}

/// `J(key, separator)`: all values of `key` joined, or `""` if absent or empty.
#[must_use]
pub fn joined_values(vars: &VarTable, key: &str, separator: Option<&str>) -> String {
    vars.get(key)
        .map(|values| values.join(separator.unwrap_or(DEFAULT_SEPARATOR)))
        .unwrap_or_default()
}

/// Resolves the key argument of a lookup helper.
///
/// A path argument (`{{E FOO}}`) names a key that must exist; a string
/// literal (`{{E "FOO"}}`) may name an absent one.
fn lookup_key<'h>(
    h: &'h Helper<'_>,
    vars: &VarTable,
) -> std::result::Result<&'h str, RenderError> {
    let param = h.param(0).ok_or_else(|| {
        RenderErrorReason::Other(format!("helper '{}' needs a key argument", h.name()))
    })?;

    if let Some(path) = param.relative_path() {
        if !vars.contains_key(path) {
            return Err(RenderErrorReason::MissingVariable(Some(path.clone())).into());
        }
        return Ok(path.as_str());
    }

    param.value().as_str().ok_or_else(|| {
        RenderErrorReason::Other(format!("helper '{}' key must be a string", h.name())).into()
    })
}

struct FirstValueHelper<'a> {
    vars: &'a VarTable,
}

impl HelperDef for FirstValueHelper<'_> {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let key = lookup_key(h, self.vars)?;
        out.write(first_value(self.vars, key))?;
        Ok(())
    }
}

struct JoinedValuesHelper<'a> {
    vars: &'a VarTable,
}

impl HelperDef for JoinedValuesHelper<'_> {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let key = lookup_key(h, self.vars)?;
        let separator = match h.param(1) {
            Some(param) => Some(param.value().as_str().ok_or_else(|| {
                RenderErrorReason::Other("helper 'J' separator must be a string".to_string())
            })?),
            None => None,
        };
        out.write(&joined_values(self.vars, key, separator))?;
        Ok(())
    }
}

/// Markup renderer bound to one variable table.
pub struct Renderer<'a> {
    registry: Handlebars<'a>,
    data: Value,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(vars: &'a VarTable) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("E", Box::new(FirstValueHelper { vars }));
        registry.register_helper("J", Box::new(JoinedValuesHelper { vars }));

        let data: Map<String, Value> = vars
            .iter()
            .map(|(key, values)| {
                let primary = values.first().cloned().unwrap_or_default();
                (key.to_string(), Value::String(primary))
            })
            .collect();

        Self {
            registry,
            data: Value::Object(data),
        }
    }

    /// Parses `source` and registers it under `name`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Parse` for malformed markup.
    pub fn compile(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Parse {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Renders a compiled template into `writer`.
    ///
    /// `source` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Unresolved` if the markup references a key that
    /// is not in the table, `TemplateError::Render` for any other failure.
    pub fn render_to_write<W: std::io::Write>(
        &self,
        name: &str,
        source: &str,
        writer: W,
    ) -> Result<(), TemplateError> {
        self.registry
            .render_to_write(name, &self.data, writer)
            .map_err(|e| classify_render_error(name, source, &e))
    }

    /// Renders a compiled template to a string.
    ///
    /// # Errors
    ///
    /// See [`Renderer::render_to_write`].
    pub fn render(&self, name: &str, source: &str) -> Result<String, TemplateError> {
        self.registry
            .render(name, &self.data)
            .map_err(|e| classify_render_error(name, source, &e))
    }

    /// Parses and renders `source` in one step.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Parse`, `TemplateError::Unresolved` or
    /// `TemplateError::Render`.
    pub fn render_str(&mut self, source: &str) -> Result<String, TemplateError> {
        self.compile(INLINE_TEMPLATE, source)?;
        let result = self.render(INLINE_TEMPLATE, source);
        self.registry.unregister_template(INLINE_TEMPLATE);
        result
    }
}

fn classify_render_error(name: &str, source: &str, err: &RenderError) -> TemplateError {
    match err.reason() {
        RenderErrorReason::MissingVariable(key) => TemplateError::Unresolved {
            source_text: source.to_string(),
            keys: key.iter().cloned().collect(),
        },
        RenderErrorReason::TemplateError(e) => TemplateError::Parse {
            name: name.to_string(),
            message: e.to_string(),
        },
        _ => TemplateError::Render {
            name: name.to_string(),
            message: err.to_string(),
        },
    }
}

/// Renders a single markup string against `vars`.
///
/// # Errors
///
/// Fails on malformed markup and on any reference to a key that is not in
/// the table.
pub fn process_string(source: &str, vars: &VarTable) -> Result<String, TemplateError> {
    Renderer::new(vars).render_str(source)
}

/// Renders the command and directory templates.
///
/// The command template is checked first; the directory template is only
/// rendered once the command succeeded.
///
/// # Errors
///
/// Returns `TemplateError::Argument` tagged with `cmd` or `dir`.
pub fn fill_args(
    cmd_template: &str,
    dir_template: &str,
    vars: &VarTable,
) -> Result<(String, String), TemplateError> {
    let mut renderer = Renderer::new(vars);

    let cmd = renderer
        .render_str(cmd_template)
        .map_err(|e| argument_error(ArgumentKind::Cmd, cmd_template, e))?;

    let dir = renderer
        .render_str(dir_template)
        .map_err(|e| argument_error(ArgumentKind::Dir, dir_template, e))?;

    Ok((cmd, dir))
}

fn argument_error(kind: ArgumentKind, template: &str, source: TemplateError) -> TemplateError {
    error!(arg = %kind, template = %template, error = %source, "error processing argument");
    TemplateError::Argument {
        kind,
        template: template.to_string(),
        source: Box::new(source),
    }
}
