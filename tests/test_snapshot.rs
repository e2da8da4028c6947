//! Saving and restoring the table through snapshot files.

use std::fs;
use std::path::Path;

use symtab::{
    Capability, CodeObject, LoadError, LoadOutcome, ParseError, Registrar, Registry,
    RegistryConfig, SnapshotError, TypeFilter,
};
use tempfile::TempDir;

fn populated(config: RegistryConfig) -> Registry {
    let mut registry = Registry::new(config);
    registry.register(CodeObject::at_path("Foo", "module").with_capability(Capability::NAMESPACE));
    registry.register(
        CodeObject::at_path("Foo::Bar", "class")
            .with_capability(Capability::NAMESPACE)
            .with_property("docstring", "A bar.")
            .with_property("line", 10i64),
    );
    registry.register(
        CodeObject::at_path("Foo#baz", "method").with_property("visibility", "public"),
    );
    registry.register(CodeObject::at_path("Stray::Child", "constant"));
    registry
}

fn never_called(_: &Path, _: &mut dyn Registrar) -> Result<(), ParseError> {
    panic!("parser must not run when a snapshot is restored");
}

#[test]
fn test_round_trip_preserves_paths_and_contents() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("table.symtab");

    let original = populated(RegistryConfig::default());
    original.save(&file).unwrap();

    let mut restored = Registry::default();
    let outcome = restored.load(&mut never_called, false, &file).unwrap();
    assert!(matches!(outcome, LoadOutcome::Restored { entries: 4 }));

    let before: Vec<_> = original.paths().cloned().collect();
    let after: Vec<_> = restored.paths().cloned().collect();
    assert_eq!(before, after);

    for path in &before {
        assert_eq!(original.at(path), restored.at(path), "contents differ at {path:?}");
    }
}

#[test]
fn test_restored_store_resolves() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("table.symtab");
    populated(RegistryConfig::default()).save(&file).unwrap();

    let mut restored = Registry::default();
    restored.load(&mut never_called, false, &file).unwrap();

    let bar = restored.at("Foo::Bar").cloned();
    let found = restored.resolve(bar.as_ref(), "baz", false);
    assert_eq!(found.object().map(|o| o.path.as_str()), Some("Foo#baz"));

    let namespaces = restored.all(&[TypeFilter::Capability(Capability::NAMESPACE)]).count();
    assert_eq!(namespaces, 2);
}

#[test]
fn test_load_replaces_store_wholesale() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("table.symtab");
    populated(RegistryConfig::default()).save(&file).unwrap();

    let mut registry = Registry::default();
    registry.register(CodeObject::at_path("OnlyInMemory", "module"));
    registry.load(&mut never_called, false, &file).unwrap();

    assert!(registry.at("OnlyInMemory").is_none());
    assert!(registry.at("Foo::Bar").is_some());
}

#[test]
fn test_corrupt_snapshot_is_fatal_and_leaves_store() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("table.symtab");
    fs::write(&file, b"garbage bytes").unwrap();

    let mut registry = Registry::default();
    registry.register(CodeObject::at_path("Kept", "module"));

    let err = registry.load(&mut never_called, false, &file).unwrap_err();
    assert!(matches!(err, LoadError::Snapshot(SnapshotError::BadMagic)));
    assert!(registry.at("Kept").is_some());
}

#[test]
fn test_truncated_snapshot_is_fatal() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("table.symtab");
    populated(RegistryConfig::default()).save(&file).unwrap();

    let bytes = fs::read(&file).unwrap();
    fs::write(&file, &bytes[..bytes.len() / 2]).unwrap();

    let mut registry = Registry::default();
    let err = registry.load(&mut never_called, false, &file).unwrap_err();
    assert!(matches!(err, LoadError::Snapshot(SnapshotError::Decode(_))));
}

#[test]
fn test_save_overwrites() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("table.symtab");

    populated(RegistryConfig::default()).save(&file).unwrap();
    Registry::default().save(&file).unwrap();

    let mut registry = Registry::default();
    let outcome = registry.load(&mut never_called, false, &file).unwrap();
    assert!(matches!(outcome, LoadOutcome::Restored { entries: 0 }));
}

#[test]
fn test_default_paths_from_config() {
    let dir = TempDir::new().unwrap();
    let config = RegistryConfig::default().with_snapshot_path(dir.path().join("configured.symtab"));

    populated(config.clone()).save_default().unwrap();
    assert!(dir.path().join("configured.symtab").exists());

    let mut registry = Registry::new(config);
    registry.load_default(&mut never_called, false).unwrap();
    assert_eq!(registry.all(&[]).count(), 4);
}
