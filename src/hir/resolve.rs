//! Name resolution — resolving names typed in documentation to code objects.
//!
//! Resolution mimics lexical scoping. A relative name is tried against
//! the starting scope first, then against each enclosing scope up to and
//! including the root, before a final attempt in the global scope.
//!
//! At every scope level the namespace-qualified candidate (`Scope::name`)
//! is tried before the instance-qualified one (`Scope#name`), so type and
//! module membership wins over instance membership when both exist.
//!
//! ## Name forms
//!
//! - `name` / `A::name` - relative, resolved by walking enclosing scopes
//! - `#name` - instance shorthand, the leading `#` is stripped
//! - `::name` - absolute, tried as written and then without the `::`

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::base::{ISEP, NSEP, PathKey, Separator};
use super::object::{CodeObject, Proxy};
use super::store::NamespaceStore;

// ============================================================================
// RESOLVE RESULT
// ============================================================================

/// Result of resolving a name.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveResult<'a> {
    /// Found the object the name refers to.
    Found(&'a CodeObject),
    /// Nothing matched and a placeholder was requested.
    Unresolved(Proxy),
    /// Nothing matched.
    NotFound,
}

impl<'a> ResolveResult<'a> {
    /// Check if resolution found a real object.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    /// Get the resolved object, if found.
    pub fn object(&self) -> Option<&'a CodeObject> {
        match self {
            ResolveResult::Found(obj) => Some(obj),
            _ => None,
        }
    }

    /// Get the placeholder, if one was produced.
    pub fn proxy(&self) -> Option<&Proxy> {
        match self {
            ResolveResult::Unresolved(proxy) => Some(proxy),
            _ => None,
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolver for name lookups against a [`NamespaceStore`].
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    /// The store to search.
    store: &'a NamespaceStore,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver.
    pub fn new(store: &'a NamespaceStore) -> Self {
        Self { store }
    }

    /// Resolve `name` as seen from `scope`.
    ///
    /// An unset scope, or the root, starts the search at the root. When
    /// nothing matches, `proxy_fallback` selects between
    /// [`ResolveResult::Unresolved`] (carrying the arguments exactly as
    /// given) and [`ResolveResult::NotFound`]. This never fails otherwise.
    pub fn resolve(
        &self,
        scope: Option<&CodeObject>,
        name: &str,
        proxy_fallback: bool,
    ) -> ResolveResult<'a> {
        let start = match scope {
            Some(obj) if !obj.is_root() => obj,
            _ => self.store.root(),
        };
        let local = name.strip_prefix(ISEP).unwrap_or(name);

        let found = if name.starts_with(NSEP) {
            self.resolve_absolute(name)
        } else {
            self.resolve_with_scope_walk(start, local)
                .or_else(|| self.resolve_global(local))
        };

        match found {
            Some(obj) => ResolveResult::Found(obj),
            None if proxy_fallback => {
                trace!(name, "unresolved, returning proxy");
                ResolveResult::Unresolved(Proxy::new(scope.map(|s| s.path.clone()), name))
            }
            None => ResolveResult::NotFound,
        }
    }

    /// `::Name` is tried as written, then with the leading `::` removed.
    fn resolve_absolute(&self, name: &str) -> Option<&'a CodeObject> {
        let stripped = &name[NSEP.len()..];
        [name, stripped].into_iter().find_map(|candidate| {
            trace!(candidate, "absolute lookup");
            self.store.at(candidate)
        })
    }

    /// Walk from `start` up through its enclosing scopes to the root.
    fn resolve_with_scope_walk(&self, start: &CodeObject, name: &str) -> Option<&'a CodeObject> {
        if let Some(found) = self.lookup_in_scope(start, name) {
            return Some(found);
        }
        if start.is_root() {
            return None;
        }

        let mut visited: FxHashSet<PathKey> = FxHashSet::default();
        visited.insert(start.path.clone());
        let mut current = self.enclosing_scope(start);

        loop {
            if !visited.insert(current.path.clone()) {
                trace!(scope = %current.path, "parent cycle, continuing at root");
                return self.lookup_in_scope(self.store.root(), name);
            }

            if let Some(found) = self.lookup_in_scope(current, name) {
                return Some(found);
            }

            if current.is_root() {
                break;
            }
            current = self.enclosing_scope(current);
        }

        None
    }

    /// Try the candidates for `name` at exactly one scope level.
    fn lookup_in_scope(&self, scope: &CodeObject, name: &str) -> Option<&'a CodeObject> {
        if scope.is_root() {
            trace!(candidate = name, "root lookup");
            return self.store.at(name);
        }
        Separator::ORDERED.into_iter().find_map(|sep| {
            let candidate = scope.path.join(sep, name);
            trace!(candidate = %candidate, "scoped lookup");
            self.store.at(&candidate)
        })
    }

    /// The parent of `scope`, falling back to the root for top-level
    /// objects and for parent paths that are not in the store.
    fn enclosing_scope(&self, scope: &CodeObject) -> &'a CodeObject {
        scope
            .parent
            .as_ref()
            .and_then(|parent| self.store.at(parent))
            .unwrap_or_else(|| self.store.root())
    }

    /// Last resort: `::name`, then `#name`, in the global scope.
    fn resolve_global(&self, name: &str) -> Option<&'a CodeObject> {
        Separator::ORDERED.into_iter().find_map(|sep| {
            let candidate = format!("{}{}", sep.as_str(), name);
            trace!(candidate = %candidate, "global lookup");
            self.store.at(&candidate)
        })
    }
}

impl Proxy {
    /// Retry the lookup this placeholder stands for.
    ///
    /// The original scope is looked up again by path; if it no longer
    /// exists the search starts from the root.
    pub fn upgrade<'a>(&self, store: &'a NamespaceStore) -> Option<&'a CodeObject> {
        let scope = self.scope.as_ref().and_then(|path| store.at(path));
        Resolver::new(store).resolve(scope, &self.name, false).object()
    }
}
