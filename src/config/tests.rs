// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::core::process::LaunchMode;
use crate::logging::LogLevel;
use std::io::Write as _;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.global.log_level, LogLevel::INFO);
    assert_eq!(config.global.log_file, None);
    assert_eq!(config.templates.suffix, ".tmpl");
    assert!(!config.templates.force);
    assert_eq!(config.process.mode, LaunchMode::Supervise);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
log_level = 4
log_file = "starter.log"

[templates]
suffix = ".in"
force = true
"#;

    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("starter.log")));
    assert_eq!(config.templates.suffix, ".in");
    assert!(config.templates.force);
    assert_eq!(config.process.mode, LaunchMode::Supervise);
}

#[test]
fn test_config_parse_empty_is_default() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_rejects_unknown_key() {
    let err = Config::parse("[templates]\nsufix = \".in\"").unwrap_err();
    assert!(err.to_string().contains("sufix"), "{err}");
}

#[test]
fn test_config_rejects_log_level_out_of_range() {
    assert!(Config::parse("[global]\nlog_level = 6").is_err());
}

#[test]
fn test_config_rejects_unknown_mode() {
    assert!(Config::parse("[process]\nmode = \"fork\"").is_err());
}

#[test]
fn test_validate_rejects_bad_suffix() {
    for suffix in ["", ".", ".."] {
        let err = Config::parse(&format!("[templates]\nsuffix = \"{suffix}\"")).unwrap_err();
        assert!(err.to_string().contains("suffix"), "{err}");
    }
}

#[test]
fn test_validate_bad_suffix_message() {
    let mut config = Config::default();
    config.templates.suffix = ".".to_string();

    insta::assert_snapshot!(
        config.validate().unwrap_err().to_string(),
        @"invalid value for 'suffix' in section '[templates]': expected a file name suffix such as '.tmpl', got '.'"
    );
}

#[cfg(unix)]
#[test]
fn test_replace_mode_valid_on_unix() {
    let config = Config::parse("[process]\nmode = \"replace\"").unwrap();
    assert_eq!(config.process.mode, LaunchMode::Replace);
}

#[cfg(not(unix))]
#[test]
fn test_replace_mode_invalid_elsewhere() {
    let err = Config::parse("[process]\nmode = \"replace\"").unwrap_err();
    assert!(err.to_string().contains("mode"), "{err}");
}

#[test]
fn test_config_builder_overrides_win() {
    let config = Config::builder()
        .add_toml_str("[templates]\nforce = false\nsuffix = \".in\"")
        .set("templates.force", true)
        .unwrap()
        .set("global.log_level", 5)
        .unwrap()
        .build()
        .unwrap();

    assert!(config.templates.force);
    assert_eq!(config.templates.suffix, ".in");
    assert_eq!(config.global.log_level, LogLevel::TRACE);
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[process]\nmode = \"supervise\"\n[templates]\nsuffix = \".tpl\"").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.templates.suffix, ".tpl");
}

#[test]
fn test_config_from_missing_file() {
    assert!(Config::from_file("/nonexistent/starter.toml").is_err());
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\nlog_level = 1")
        .add_toml_str("[templates]\nforce = true");

    assert_eq!(
        loader.format_loaded_files(),
        ["1. [string] <string>", "2. [string] <string>"]
    );
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/path.toml");
    assert!(loader.loaded_files().is_empty());

    let config = loader.build().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_format_options() {
    let config = Config::default();

    assert_eq!(
        config.format_options(),
        [
            "global.log_file  = ",
            "global.log_level = 3",
            "process.mode     = supervise",
            "templates.force  = false",
            "templates.suffix = .tmpl",
        ]
    );
}
