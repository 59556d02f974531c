use std::fs;

use ormtype_manifest::{Error, GenerationConfig, Snapshot, WriterKind};
use tempfile::TempDir;

#[test]
fn config_from_file_reports_filename() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ormtype.toml");
    fs::write(&path, "[writer]\ndefault = \"json\"\n").unwrap();

    let config = GenerationConfig::from_file(&path).unwrap();
    assert_eq!(config.writer.default, WriterKind::Json);

    fs::write(&path, "[writer\n").unwrap();
    let err = GenerationConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("ormtype.toml"));
}

#[test]
fn missing_config_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = GenerationConfig::from_file(temp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn snapshot_format_follows_extension() {
    let temp = TempDir::new().unwrap();

    let json = temp.path().join("schema.json");
    fs::write(&json, r#"{ "models": [{ "class": "App\\Models\\Post" }] }"#).unwrap();
    let snapshot = Snapshot::from_file(&json).unwrap();
    assert_eq!(snapshot.models[0].short_name(), "Post");
    assert_eq!(snapshot.path.as_deref(), Some(json.as_path()));

    let toml = temp.path().join("schema.toml");
    fs::write(&toml, "[[models]]\nclass = \"App\\\\Models\\\\Tag\"\n").unwrap();
    let snapshot = Snapshot::from_file(&toml).unwrap();
    assert_eq!(snapshot.models[0].short_name(), "Tag");
}
