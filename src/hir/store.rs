//! The namespace store — insertion-ordered map from path to code object.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::base::PathKey;
use super::object::{CodeObject, Registrable, TypeFilter, TypeTag};
use super::resolve::{ResolveResult, Resolver};

/// Registration callback handed to parsers.
///
/// Anything that can accept discovered objects implements this, so a
/// parser never needs to know which table it is populating.
pub trait Registrar {
    fn register(&mut self, object: CodeObject);
}

/// All code objects keyed by path, in insertion order.
///
/// Always contains exactly one root object at the empty path. The root is
/// never enumerated by [`all`](Self::all) and never removed.
#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceStore {
    objects: IndexMap<PathKey, CodeObject>,
}

impl NamespaceStore {
    /// Create a store holding only the root.
    pub fn new() -> Self {
        let mut objects = IndexMap::new();
        objects.insert(PathKey::root(), CodeObject::root());
        Self { objects }
    }

    /// Build a store from already-keyed objects.
    ///
    /// Callers must guarantee the root is present.
    pub(crate) fn from_objects(objects: IndexMap<PathKey, CodeObject>) -> Self {
        debug_assert!(objects.contains_key(""));
        Self { objects }
    }

    /// Insert an object keyed by its path.
    ///
    /// Proxies are ignored. An existing entry at the same path is replaced
    /// in place and keeps its position. The empty path only accepts an
    /// object tagged [`TypeTag::ROOT`].
    pub fn register(&mut self, item: impl Into<Registrable>) {
        match item.into() {
            Registrable::Object(object) if object.is_root() && object.kind != TypeTag::ROOT => {
                warn!(kind = %object.kind, "ignoring non-root object registered at the root path");
            }
            Registrable::Object(object) => {
                debug!(path = %object.path, kind = %object.kind, "register");
                self.objects.insert(object.path.clone(), object);
            }
            Registrable::Proxy(proxy) => {
                debug!(name = %proxy.name, "ignoring proxy registration");
            }
        }
    }

    /// Look up the object at `path`. The empty path yields the root.
    pub fn at(&self, path: impl AsRef<str>) -> Option<&CodeObject> {
        self.objects.get(path.as_ref())
    }

    /// The root object.
    pub fn root(&self) -> &CodeObject {
        // The root entry is inserted at construction and never removed.
        &self.objects[""]
    }

    /// Remove `object` (keyed by its own path). Missing entries are ignored.
    pub fn delete(&mut self, object: &CodeObject) -> Option<CodeObject> {
        self.delete_path(&object.path)
    }

    /// Remove the object at `path`. The root cannot be removed.
    pub fn delete_path(&mut self, path: impl AsRef<str>) -> Option<CodeObject> {
        let path = path.as_ref();
        if path.is_empty() {
            return None;
        }
        let removed = self.objects.shift_remove(path);
        if removed.is_some() {
            debug!(path, "delete");
        }
        removed
    }

    /// All non-root objects in insertion order.
    ///
    /// With a non-empty `filters`, only objects matching at least one
    /// filter are produced.
    pub fn all<'a, 'f>(
        &'a self,
        filters: &'f [TypeFilter],
    ) -> impl Iterator<Item = &'a CodeObject> {
        self.objects
            .values()
            .filter(|obj| !obj.is_root())
            .filter(move |obj| filters.is_empty() || filters.iter().any(|f| obj.matches(f)))
    }

    /// Every key in insertion order, including the root's empty path.
    pub fn paths(&self) -> impl Iterator<Item = &PathKey> {
        self.objects.keys()
    }

    /// Every entry in insertion order, including the root.
    pub fn iter(&self) -> impl Iterator<Item = &CodeObject> {
        self.objects.values()
    }

    pub fn contains(&self, path: impl AsRef<str>) -> bool {
        self.objects.contains_key(path.as_ref())
    }

    /// Number of objects, excluding the root.
    pub fn len(&self) -> usize {
        self.objects.len() - 1
    }

    /// Whether the store holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard everything and start over with a fresh root.
    pub fn clear(&mut self) {
        debug!(discarded = self.len(), "clear");
        *self = Self::new();
    }

    /// Resolve `name` relative to `scope`. See [`Resolver::resolve`].
    pub fn resolve(
        &self,
        scope: Option<&CodeObject>,
        name: &str,
        proxy_fallback: bool,
    ) -> ResolveResult<'_> {
        Resolver::new(self).resolve(scope, name, proxy_fallback)
    }
}

impl Default for NamespaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrar for NamespaceStore {
    fn register(&mut self, object: CodeObject) {
        NamespaceStore::register(self, object);
    }
}
