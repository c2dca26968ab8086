//! Tests for loading the catalog and particle field from the outside.

use folio_content::{Catalog, DEFAULT_PARTICLE_COUNT, ProjectQuery, particle_field};
use std::io::Write;
use std::path::PathBuf;

fn shipped_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content/projects.toml")
}

#[test]
fn test_shipped_catalog_loads() {
    let catalog = Catalog::from_file(shipped_catalog()).expect("shipped catalog parses");
    assert!(!catalog.is_empty());
    assert_eq!(catalog.categories().first().map(String::as_str), Some("all"));
    for project in catalog.projects() {
        assert!(!project.id().is_empty());
        assert!(catalog.find(project.id()).is_some());
    }
}

#[test]
fn test_catalog_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
[[projects]]
id = "solo"
title = "Solo"
technologies = ["Rust"]
category = "tools"
"#
    )
    .expect("write catalog");

    let catalog = Catalog::from_file(file.path()).expect("catalog loads");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.filter(&ProjectQuery::search("rust")).len(), 1);
    assert!(catalog.related("solo", 3).is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let err = Catalog::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(err.message.contains("Failed to read catalog file"));
}

#[test]
fn test_malformed_catalog_is_an_error() {
    let err = Catalog::from_toml_str("[[projects]]\nid = 3\n").unwrap_err();
    assert!(err.message.contains("Failed to parse catalog"));
}

#[test]
fn test_particle_field_serializes_stably() {
    let first = serde_json::to_string(&particle_field(DEFAULT_PARTICLE_COUNT)).unwrap();
    let second = serde_json::to_string(&particle_field(DEFAULT_PARTICLE_COUNT)).unwrap();
    assert_eq!(first, second);
}
