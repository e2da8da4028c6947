//! The registry handle — one symbol table and its configuration.

use std::path::Path;

use crate::config::RegistryConfig;
use crate::error::{LoadError, SnapshotError};
use crate::hir::{CodeObject, NamespaceStore, Registrable, Registrar, ResolveResult, TypeFilter};
use crate::base::PathKey;
use crate::project::{LoadOutcome, SourceParser, WorkspaceLoader, snapshot};

/// A symbol table together with the settings used to persist it.
///
/// Callers own the handle and pass it where it is needed; there is no
/// process-wide instance.
///
/// ```
/// use symtab::{CodeObject, Registry};
///
/// let mut registry = Registry::default();
/// registry.register(CodeObject::at_path("Foo", "module"));
/// registry.register(CodeObject::at_path("Foo#baz", "method"));
///
/// let foo = registry.at("Foo").cloned();
/// let found = registry.resolve(foo.as_ref(), "#baz", false);
/// assert_eq!(found.object().unwrap().path.as_str(), "Foo#baz");
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    store: NamespaceStore,
    config: RegistryConfig,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            store: NamespaceStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &NamespaceStore {
        &self.store
    }

    pub fn register(&mut self, item: impl Into<Registrable>) {
        self.store.register(item);
    }

    pub fn at(&self, path: impl AsRef<str>) -> Option<&CodeObject> {
        self.store.at(path)
    }

    pub fn root(&self) -> &CodeObject {
        self.store.root()
    }

    pub fn delete(&mut self, object: &CodeObject) -> Option<CodeObject> {
        self.store.delete(object)
    }

    pub fn all<'a, 'f>(
        &'a self,
        filters: &'f [TypeFilter],
    ) -> impl Iterator<Item = &'a CodeObject> {
        self.store.all(filters)
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathKey> {
        self.store.paths()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn resolve(
        &self,
        scope: Option<&CodeObject>,
        name: &str,
        proxy_fallback: bool,
    ) -> ResolveResult<'_> {
        self.store.resolve(scope, name, proxy_fallback)
    }

    /// Write a snapshot to `path`.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        snapshot::save(&self.store, path)
    }

    /// Write a snapshot to the configured path.
    pub fn save_default(&self) -> Result<(), SnapshotError> {
        self.save(&self.config.snapshot_path)
    }

    /// Restore from the snapshot at `path`, or rebuild with `parser`.
    pub fn load(
        &mut self,
        parser: &mut dyn SourceParser,
        force_rebuild: bool,
        path: &Path,
    ) -> Result<LoadOutcome, LoadError> {
        WorkspaceLoader::new(&self.config).load(&mut self.store, parser, force_rebuild, path)
    }

    /// [`load`](Self::load) using the configured snapshot path.
    pub fn load_default(
        &mut self,
        parser: &mut dyn SourceParser,
        force_rebuild: bool,
    ) -> Result<LoadOutcome, LoadError> {
        WorkspaceLoader::new(&self.config).load(
            &mut self.store,
            parser,
            force_rebuild,
            &self.config.snapshot_path,
        )
    }
}

impl Registrar for Registry {
    fn register(&mut self, object: CodeObject) {
        self.store.register(object);
    }
}
