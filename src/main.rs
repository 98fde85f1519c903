// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> run_starter --> exit code
//! ```

use std::process::{ExitCode, ExitStatus};

use starter_rs::cli::{self, Cli};
use starter_rs::cmd::run::run_starter;
use starter_rs::config::loader::ConfigLoader;
use starter_rs::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use starter_rs::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    for option in config.format_options() {
        tracing::debug!("{option}");
    }

    match run_starter(&cli, &config).await {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_config_loader(cli: &Cli) -> starter_rs::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    if let Some(path) = &cli.global.config {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in cli.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn load_config(cli: &Cli) -> starter_rs::error::Result<Config> {
    build_config_loader(cli)?.build()
}

fn build_log_config(config: &Config) -> LogConfig {
    let console_level = config.global.log_level;
    let file_level = console_level.max(LogLevel::DEBUG);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

/// The child's own code; 1 if it had none (killed by a signal).
fn exit_code(status: ExitStatus) -> ExitCode {
    if status.success() {
        return ExitCode::SUCCESS;
    }
    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .filter(|&code| code != 0)
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
