// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the variable extension module.

use super::extend_variables;
use super::link::{LinkKey, LinkValue};
use super::table::VarTable;
use crate::core::test_utils::{capture_logs, lines_with};

fn values(vars: &VarTable, key: &str) -> Vec<String> {
    vars.get(key).map(<[String]>::to_vec).unwrap_or_default()
}

// =============================================================================
// VarTable
// =============================================================================

#[test]
fn test_add_new_to_empty_table() {
    let mut vars = VarTable::new();
    assert!(vars.add_new("key", "value"));
    assert_eq!(vars.len(), 1);
    assert_eq!(values(&vars, "key"), ["value"]);
}

#[test]
fn test_add_new_appends_distinct_values() {
    let mut vars = VarTable::new();
    vars.add_new("key", "value1");
    assert!(vars.add_new("key", "value2"));
    assert_eq!(values(&vars, "key"), ["value1", "value2"]);
    assert_eq!(vars.primary("key"), Some("value1"));
}

#[test]
fn test_add_new_skips_present_value() {
    let mut vars = VarTable::new();
    vars.add_new("key", "value1");
    assert!(!vars.add_new("key", "value1"));
    assert_eq!(values(&vars, "key"), ["value1"]);
}

#[test]
fn test_from_entries_splits_on_first_equals() {
    let vars = VarTable::from_entries([
        "FOO=BAR",
        "URL=http://x/?a=b",
        "EMPTY=",
        "FOO=BAZ",
        "FOO=BAR",
        "NOEQUALS",
        "=C:=C:\\",
    ]);
    assert_eq!(values(&vars, "FOO"), ["BAR", "BAZ"]);
    assert_eq!(vars.primary("URL"), Some("http://x/?a=b"));
    assert_eq!(vars.primary("EMPTY"), Some(""));
    assert!(!vars.contains_key("NOEQUALS"));
    assert_eq!(vars.len(), 3);
}

#[test]
fn test_env_strings_use_primary_values() {
    let mut vars = VarTable::new();
    vars.insert("B", ["2", "3"]);
    vars.insert("A", ["1"]);
    vars.insert("EMPTY", Vec::<String>::new());
    assert_eq!(vars.to_env_strings(), ["A=1", "B=2"]);
}

// =============================================================================
// Link parsing
// =============================================================================

#[test]
fn test_link_key_parse() {
    assert_eq!(
        LinkKey::parse("APP_PORT_1234_TCP"),
        Some(LinkKey {
            app: "APP".to_string(),
            index: None,
            port: 1234,
        })
    );
    assert_eq!(
        LinkKey::parse("ES_2_PORT_9200_TCP"),
        Some(LinkKey {
            app: "ES".to_string(),
            index: Some("2".to_string()),
            port: 9200,
        })
    );
    assert_eq!(
        LinkKey::parse("DB_ENV_PORT_5432_TCP").map(|k| k.port_url_key()),
        Some("DB_5432_URL".to_string())
    );
}

#[test]
fn test_link_key_keeps_large_index() {
    let key = LinkKey::parse("ES_99999999999_PORT_9200_TCP").unwrap();
    assert_eq!(key.app, "ES");
    assert_eq!(key.index.as_deref(), Some("99999999999"));
    assert_eq!(key.url_key(), "ES_URL");
    assert_eq!(key.port_url_key(), "ES_9200_URL");
}

#[test]
fn test_link_key_rejects_non_links() {
    for key in [
        "FOO",
        "APP_PORT_1234_TCP_ADDR",
        "APP_PORT_1234_UDP",
        "APP_PORT_99999_TCP",
        "_PORT_1234_TCP",
    ] {
        assert_eq!(LinkKey::parse(key), None, "{key} should not be a link key");
    }
}

#[test]
fn test_link_value_parse() {
    let value = LinkValue::parse("tcp://172.17.0.63:9200").unwrap();
    assert_eq!(value.scheme, "tcp");
    assert_eq!(value.host, "172.17.0.63");
    insta::assert_snapshot!(value.url(), @"http://172.17.0.63:9200");

    assert_eq!(LinkValue::parse("tcp://INVALID"), None);
    assert_eq!(LinkValue::parse("hostname:1234"), None);
}

// =============================================================================
// extend_variables
// =============================================================================

#[test]
fn test_no_link_variables() {
    let vars = extend_variables(["FOO=BAR", "HOME=/root"]);
    let keys: Vec<_> = vars.keys().collect();
    assert_eq!(keys, ["FOO", "HOME"]);
    assert_eq!(values(&vars, "FOO"), ["BAR"]);
}

#[test]
fn test_single_link_variable() {
    let vars = extend_variables(["APP_PORT_1234_TCP=tcp://hostname:1234"]);
    assert_eq!(vars.len(), 3);
    assert_eq!(values(&vars, "APP_URL"), ["http://hostname:1234"]);
    assert_eq!(values(&vars, "APP_1234_URL"), ["http://hostname:1234"]);
}

#[test]
fn test_existing_variables_are_not_overwritten() {
    let before = extend_variables([
        "APP_URL=FOO",
        "APP_1234_URL=BAR",
        "APP_PORT_1234_TCP=tcp://hostname:1234",
    ]);
    let after = extend_variables([
        "APP_PORT_1234_TCP=tcp://hostname:1234",
        "APP_URL=FOO",
        "APP_1234_URL=BAR",
    ]);

    assert_eq!(before, after);
    assert_eq!(before.len(), 3);
    assert_eq!(values(&before, "APP_URL"), ["FOO", "http://hostname:1234"]);
    assert_eq!(values(&before, "APP_1234_URL"), ["BAR", "http://hostname:1234"]);
}

#[test]
fn test_invalid_link_value_is_skipped() {
    let vars = extend_variables(["KIBANA_PORT_5601_TCP=tcp://INVALID"]);
    assert_eq!(vars.len(), 1);
    assert!(vars.get("KIBANA_URL").is_none());
}

#[test]
fn test_multiple_ports_for_one_application() {
    let vars = extend_variables([
        "ES_PORT_9300_TCP=tcp://172.17.0.63:9300",
        "ES_PORT_9200_TCP=tcp://172.17.0.63:9200",
    ]);
    assert_eq!(vars.len(), 5);
    assert_eq!(
        values(&vars, "ES_URL"),
        ["http://172.17.0.63:9200", "http://172.17.0.63:9300"]
    );
    assert_eq!(values(&vars, "ES_9200_URL"), ["http://172.17.0.63:9200"]);
    assert_eq!(values(&vars, "ES_9300_URL"), ["http://172.17.0.63:9300"]);
}

#[test]
fn test_indexed_links_follow_key_order() {
    let vars = extend_variables([
        "ES_3_PORT_9200_TCP=tcp://es3:9200",
        "ES_1_PORT_9200_TCP=tcp://es1:9200",
        "ES_2_PORT_9200_TCP=tcp://es2:9200",
    ]);
    let expected = ["http://es1:9200", "http://es2:9200", "http://es3:9200"];
    assert_eq!(values(&vars, "ES_URL"), expected);
    assert_eq!(values(&vars, "ES_9200_URL"), expected);
    assert_eq!(vars.len(), 5);
}

#[test]
fn test_multiple_applications_with_multiple_ports() {
    let vars = extend_variables([
        "APP_1_PORT_1000_TCP=tcp://hostname1:1000",
        "APP_1_PORT_2000_TCP=tcp://hostname1:2000",
        "APP_2_PORT_1000_TCP=tcp://hostname2:1000",
        "APP_2_PORT_2000_TCP=tcp://hostname2:2000",
    ]);
    assert_eq!(vars.len(), 7);
    assert_eq!(
        values(&vars, "APP_URL"),
        [
            "http://hostname1:1000",
            "http://hostname1:2000",
            "http://hostname2:1000",
            "http://hostname2:2000",
        ]
    );
    assert_eq!(
        values(&vars, "APP_1000_URL"),
        ["http://hostname1:1000", "http://hostname2:1000"]
    );
    assert_eq!(
        values(&vars, "APP_2000_URL"),
        ["http://hostname1:2000", "http://hostname2:2000"]
    );
}

#[test]
fn test_only_primary_link_value_is_used() {
    let vars = extend_variables([
        "APP_PORT_80_TCP=tcp://first:80",
        "APP_PORT_80_TCP=tcp://second:80",
    ]);
    assert_eq!(values(&vars, "APP_URL"), ["http://first:80"]);
}

#[test]
fn test_large_index_link_is_extended() {
    let vars = extend_variables(["ES_99999999999_PORT_9200_TCP=tcp://es:9200"]);
    assert_eq!(values(&vars, "ES_URL"), ["http://es:9200"]);
    assert_eq!(values(&vars, "ES_9200_URL"), ["http://es:9200"]);
}

// =============================================================================
// extend_variables logging
// =============================================================================

#[test]
fn test_no_link_variables_log_nothing() {
    let (vars, logs) = capture_logs(|| extend_variables(["FOO=BAR", "HOME=/root"]));
    assert_eq!(vars.len(), 2);
    assert_eq!(logs, "");
}

#[test]
fn test_invalid_link_value_is_logged() {
    let (_, logs) = capture_logs(|| extend_variables(["KIBANA_PORT_5601_TCP=tcp://INVALID"]));

    let lines = lines_with(&logs, "found invalid link value");
    assert_eq!(lines.len(), 1, "logs: {logs}");
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("KIBANA_PORT_5601_TCP"));
    assert!(lines_with(&logs, "use:").is_empty(), "logs: {logs}");
}

#[test]
fn test_one_use_line_per_derived_key() {
    let (_, logs) = capture_logs(|| {
        extend_variables([
            "ES_1_PORT_9200_TCP=tcp://es1:9200",
            "ES_2_PORT_9200_TCP=tcp://es2:9200",
        ])
    });

    let lines = lines_with(&logs, "use:");
    assert_eq!(lines.len(), 2, "logs: {logs}");
    assert!(lines.iter().any(|l| l.contains("key=ES_URL ")));
    assert!(lines.iter().any(|l| l.contains("key=ES_9200_URL ")));
    assert_eq!(lines_with(&logs, "found link variable").len(), 2);
}

#[test]
fn test_unchanged_keys_log_no_use_line() {
    let (_, logs) = capture_logs(|| {
        extend_variables([
            "ES_URL=http://es1:9200",
            "ES_1_PORT_9200_TCP=tcp://es1:9200",
        ])
    });

    let lines = lines_with(&logs, "use:");
    assert_eq!(lines.len(), 1, "logs: {logs}");
    assert!(lines[0].contains("key=ES_9200_URL "));
}
