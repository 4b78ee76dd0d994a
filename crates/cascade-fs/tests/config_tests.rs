use cascade_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

fn load_from(file_name: &str, content: &str) -> cascade_fs::Result<TestConfig> {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(file_name);
    fs::write(&file_path, content).unwrap();
    ConfigStore::new().load(&NormalizedPath::new(&file_path))
}

#[test]
fn test_load_toml() {
    let config = load_from("config.toml", "name = \"test\"\ncount = 42").unwrap();
    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_json() {
    let config = load_from("config.json", r#"{"name": "test", "count": 42}"#).unwrap();
    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_yaml() {
    let config = load_from("config.yml", "name: test\ncount: 42").unwrap();
    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_invalid_toml_reports_format() {
    let err = load_from("config.toml", "name = ").unwrap_err();
    match err {
        Error::ConfigParse { format, .. } => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_load_unsupported_extension() {
    let err = load_from("config.ini", "name = test").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { extension } if extension == "ini"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.toml"));
    let err = ConfigStore::new().load::<TestConfig>(&path).unwrap_err();
    assert!(err.is_not_found());
}
