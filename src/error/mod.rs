// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            StarterError (two words)
//!                     |
//!     +--------+------+-------+--------+
//!     |        |      |       |        |
//!     v        v      v       v        v
//!  Template  File  Process  Config    Io
//!    Box     Box     Box     Box    Box
//!
//! Sub-errors:
//!   Template  Argument{cmd|dir}, Parse, Unresolved, Render
//!   File      ReadDir, InvalidTemplateName, DestinationExists, Read,
//!             Create, Write
//!   Process   CommandNotFound, Exec, Wait, Unsupported
//!   Config    ParseError, InvalidValue
//! ```
//!
//! Unparsable link values are the one failure that never becomes an error;
//! the extender logs and skips them.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`StarterError`].
pub type StarterResult<T> = std::result::Result<T, StarterError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum StarterError {
    /// Template markup could not be parsed or filled.
    #[error("template error: {0}")]
    Template(#[from] Box<TemplateError>),

    /// Template discovery or output file handling failed.
    #[error("file error: {0}")]
    File(#[from] Box<FileError>),

    /// Starting or waiting for the child failed.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for StarterError {
                fn from(err: $error) -> Self {
                    StarterError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    TemplateError => Template,
    FileError => File,
    ProcessError => Process,
    ConfigError => Config,
    std::io::Error => Io,
}

impl StarterError {
    /// Returns the template error, if this is one.
    #[must_use]
    pub fn as_template(&self) -> Option<&TemplateError> {
        match self {
            Self::Template(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the file error, if this is one.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileError> {
        match self {
            Self::File(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the process error, if this is one.
    #[must_use]
    pub fn as_process(&self) -> Option<&ProcessError> {
        match self {
            Self::Process(e) => Some(e),
            _ => None,
        }
    }
}

// --- Template Errors ---

/// Which templated command-line argument failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Cmd,
    Dir,
}

impl std::fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd => write!(f, "cmd"),
            Self::Dir => write!(f, "dir"),
        }
    }
}

/// Markup errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The `--cmd` or `--dir` template could not be processed.
    #[error("error processing {kind}: {template} ({source})")]
    Argument {
        kind: ArgumentKind,
        template: String,
        #[source]
        source: Box<TemplateError>,
    },

    /// Markup is syntactically broken.
    #[error("cannot parse template '{name}': {message}")]
    Parse { name: String, message: String },

    /// Markup referenced keys that are not in the variable table.
    #[error("could not fill all markup in: {source_text}")]
    Unresolved {
        source_text: String,
        keys: Vec<String>,
    },

    /// Rendering failed for another reason (helper misuse, write failure).
    #[error("cannot render template '{name}': {message}")]
    Render { name: String, message: String },
}

impl TemplateError {
    /// Keys that failed to resolve, if this is an unresolved-markup error.
    #[must_use]
    pub fn unresolved_keys(&self) -> &[String] {
        match self {
            Self::Unresolved { keys, .. } => keys,
            Self::Argument { source, .. } => source.unresolved_keys(),
            _ => &[],
        }
    }
}

// --- File Errors ---

/// Template file discovery and output errors.
#[derive(Debug, Error)]
pub enum FileError {
    /// Template directory cannot be listed.
    #[error("cannot read dir '{path}': {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File name does not carry the template suffix.
    #[error("invalid template name: {name}")]
    InvalidTemplateName { name: String },

    /// Destination exists and overwriting was not requested.
    #[error("destination exists: {path}")]
    DestinationExists { path: String },

    /// Template file cannot be read.
    #[error("cannot read template '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output file cannot be created.
    #[error("error creating file '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendered output could not be moved onto the destination.
    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Process Errors ---

/// Child process errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found.
    #[error("error executing command: '{name}' not found")]
    CommandNotFound { name: String },

    /// Failed to start the child.
    #[error("error executing command '{command}': {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed waiting for the child.
    #[error("error waiting for command '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested launch mode is not available on this platform.
    #[error("unsupported on this platform: {0}")]
    Unsupported(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
