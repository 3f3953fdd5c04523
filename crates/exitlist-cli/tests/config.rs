//! Configuration layering tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use exitlist_cli::config::{
    DEFAULT_REGION, DEFAULT_SOURCE_URL, DEFAULT_TABLE_NAME, SyncConfig,
};
use exitlist_ingest::DEFAULT_SECTION_SELECTOR;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_match_the_published_table() {
    let config = SyncConfig::default();
    assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(config.structured_path, Path::new("extended-table.json"));
    assert_eq!(config.table_name, DEFAULT_TABLE_NAME);
    assert_eq!(config.region, DEFAULT_REGION);
    assert_eq!(
        config.store_path(),
        Path::new("data/YaleSonnenfeldList.json")
    );
    assert_eq!(config.request_timeout().as_secs(), 30);
    assert_eq!(
        config.scrape_options().section_selector,
        DEFAULT_SECTION_SELECTOR
    );
}

#[test]
fn loads_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exitlist.json");
    fs::write(
        &path,
        r#"{"table_name": "Exits", "request_timeout_secs": 5}"#,
    )
    .unwrap();

    let config = SyncConfig::load(&path).unwrap();
    assert_eq!(config.table_name, "Exits");
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.region, DEFAULT_REGION);
    assert_eq!(config.store_path(), Path::new("data/Exits.json"));
}

#[test]
fn rejects_unknown_keys_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exitlist.json");
    fs::write(&path, r#"{"tabel_name": "Exits"}"#).unwrap();
    let err = SyncConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parse config"));

    let err = SyncConfig::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(format!("{err:#}").contains("read config"));
}

#[test]
fn environment_overrides_file_values() {
    let base = SyncConfig {
        table_name: "FromFile".to_string(),
        ..SyncConfig::default()
    };
    let config = base
        .apply_env_from(env(&[
            ("EXITLIST_TABLE_NAME", "FromEnv"),
            ("EXITLIST_STORE_PATH", "/tmp/exits.json"),
            ("EXITLIST_SECTION_SELECTOR", "section.companies"),
            ("EXITLIST_REQUEST_TIMEOUT_SECS", "10"),
            ("EXITLIST_REGION", "  "),
        ]))
        .unwrap();
    assert_eq!(config.table_name, "FromEnv");
    assert_eq!(config.store_path(), PathBuf::from("/tmp/exits.json"));
    assert_eq!(config.scrape_options().section_selector, "section.companies");
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.region, DEFAULT_REGION);
}

#[test]
fn invalid_timeout_is_an_error() {
    let err = SyncConfig::default()
        .apply_env_from(env(&[("EXITLIST_REQUEST_TIMEOUT_SECS", "later")]))
        .unwrap_err();
    assert!(err.to_string().contains("EXITLIST_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn load_or_default_without_path() {
    assert_eq!(
        SyncConfig::load_or_default(None).unwrap(),
        SyncConfig::default()
    );
}
