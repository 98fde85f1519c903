// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolved command description.
//!
//! ```text
//! CommandSpec::resolve("nginx", ["-g", "daemon off;"], &vars)
//!   which("nginx")      --> binary  (CommandNotFound)
//!   argv                --> ["nginx", "-g", "daemon off;"]
//!   vars.to_env_pairs() --> env     (primary values, key order)
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::core::vars::table::VarTable;
use crate::error::ProcessError;

/// Everything needed to start the target command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command as given; becomes argv[0].
    program: String,
    /// Resolved executable.
    binary: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Resolves `program` to an executable and flattens `vars` into the
    /// child environment.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::CommandNotFound` if `program` cannot be found.
    pub fn resolve(
        program: &str,
        args: &[String],
        vars: &VarTable,
    ) -> Result<Self, ProcessError> {
        let binary = which::which(program).map_err(|_| ProcessError::CommandNotFound {
            name: program.to_string(),
        })?;

        Ok(Self {
            program: program.to_string(),
            binary,
            args: args.to_vec(),
            env: vars.to_env_pairs(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Child environment as `(NAME, VALUE)` pairs.
    #[must_use]
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Child environment as `NAME=VALUE` strings.
    #[must_use]
    pub fn env_strings(&self) -> Vec<String> {
        self.env.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }

    /// Full argument vector, starting with the command as given.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Builds the tokio command: cleared environment, inherited stdio.
    pub(super) fn to_command(&self) -> Command {
        let mut command = Command::new(&self.binary);

        #[cfg(unix)]
        command.arg0(&self.program);

        command
            .args(&self.args)
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false);

        #[cfg(windows)]
        super::windows::configure(&mut command);

        command
    }
}
