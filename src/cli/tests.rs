// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::Cli;
use crate::core::process::LaunchMode;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_minimal() {
    let cli = Cli::try_parse_from(["starter", "--cmd", "nginx"]).unwrap();

    assert_eq!(cli.cmd, "nginx");
    assert_eq!(cli.dir, ".");
    assert!(!cli.force);
    assert!(cli.args.is_empty());
    assert!(cli.to_config_overrides().is_empty());
}

#[test]
fn test_parse_trailing_args() {
    let cli = Cli::try_parse_from([
        "starter",
        "--cmd",
        "nginx",
        "--dir",
        "/etc/nginx",
        "--",
        "-g",
        "daemon off;",
    ])
    .unwrap();

    assert_eq!(cli.dir, "/etc/nginx");
    assert_eq!(cli.args, ["-g", "daemon off;"]);
}

#[test]
fn test_parse_template_arguments_verbatim() {
    let cli = Cli::try_parse_from([
        "starter",
        "--cmd",
        r#"{{E "BINARY"}}"#,
        "--dir",
        r#"{{E "CONF_DIR"}}"#,
    ])
    .unwrap();

    assert_eq!(cli.cmd, r#"{{E "BINARY"}}"#);
    assert_eq!(cli.dir, r#"{{E "CONF_DIR"}}"#);
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "starter",
        "--cmd",
        "true",
        "--force",
        "-l",
        "5",
        "--log-file",
        "/tmp/starter.log",
        "-c",
        "extra.toml",
        "--mode",
        "replace",
    ])
    .unwrap();

    assert!(cli.force);
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.config, Some(PathBuf::from("extra.toml")));
    assert_eq!(cli.global.mode, Some(LaunchMode::Replace));

    let keys: Vec<&str> = cli.to_config_overrides().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        [
            "global.log_level",
            "global.log_file",
            "process.mode",
            "templates.force"
        ]
    );
}

#[test]
fn test_parse_rejects_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["starter", "--cmd", "true", "-l", "6"]).is_err());
}

#[test]
fn test_parse_rejects_unknown_mode() {
    assert!(Cli::try_parse_from(["starter", "--cmd", "true", "--mode", "fork"]).is_err());
}

#[test]
fn test_cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
