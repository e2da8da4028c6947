//! Code objects — the entities stored in the symbol table.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::base::{PathKey, Separator};

/// The type tag of a code object, e.g. `class`, `module`, `method`.
///
/// The concrete taxonomy belongs to the parser; the table only compares tags.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(SmolStr);

impl TypeTag {
    /// Tag carried by the root object.
    pub const ROOT: TypeTag = TypeTag(SmolStr::new_static("root"));

    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(SmolStr::new(tag.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.0)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// An "is-a" capability of a code object.
///
/// Where a type tag names exactly one kind, a capability is shared by a
/// family of kinds: classes and modules are both `namespace`s.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(SmolStr);

impl Capability {
    /// Objects that can contain other objects.
    pub const NAMESPACE: Capability = Capability(SmolStr::new_static("namespace"));

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({})", self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A parser-supplied payload value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(SmolStr),
    Integer(i64),
    Boolean(bool),
    List(Vec<PropertyValue>),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(SmolStr::new(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

/// A code object discovered by the parser.
///
/// `parent` is a lookup-only reference: it names the enclosing object's
/// path and is resolved against the store on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeObject {
    pub path: PathKey,
    pub parent: Option<PathKey>,
    pub kind: TypeTag,
    pub capabilities: Vec<Capability>,
    pub payload: IndexMap<SmolStr, PropertyValue>,
}

impl CodeObject {
    /// Create an object named `name` inside `parent`.
    pub fn new(parent: &CodeObject, sep: Separator, name: &str, kind: impl Into<TypeTag>) -> Self {
        Self {
            path: parent.path.join(sep, name),
            parent: Some(parent.path.clone()),
            kind: kind.into(),
            capabilities: Vec::new(),
            payload: IndexMap::new(),
        }
    }

    /// Create an object at an explicit path.
    ///
    /// The parent defaults to the lexical parent of `path`.
    pub fn at_path(path: impl Into<PathKey>, kind: impl Into<TypeTag>) -> Self {
        let path = path.into();
        Self {
            parent: path.lexical_parent(),
            path,
            kind: kind.into(),
            capabilities: Vec::new(),
            payload: IndexMap::new(),
        }
    }

    /// The root object.
    pub fn root() -> Self {
        Self {
            path: PathKey::root(),
            parent: None,
            kind: TypeTag::ROOT,
            capabilities: vec![Capability::NAMESPACE],
            payload: IndexMap::new(),
        }
    }

    /// Override the parent reference.
    pub fn with_parent(mut self, parent: Option<PathKey>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_capability(mut self, capability: impl Into<Capability>) -> Self {
        let capability = capability.into();
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.payload.insert(SmolStr::new(key), value.into());
        self
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }

    /// The local name (last path segment).
    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.payload.get(key)
    }

    /// Whether this object matches `filter`.
    pub fn matches(&self, filter: &TypeFilter) -> bool {
        match filter {
            TypeFilter::Tag(tag) => &self.kind == tag,
            TypeFilter::Capability(cap) => self.has_capability(cap),
        }
    }
}

/// A filter for [`NamespaceStore::all`](super::NamespaceStore::all).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeFilter {
    /// Exact type-tag equality.
    Tag(TypeTag),
    /// "Is-a" capability check.
    Capability(Capability),
}

impl From<TypeTag> for TypeFilter {
    fn from(tag: TypeTag) -> Self {
        TypeFilter::Tag(tag)
    }
}

impl From<Capability> for TypeFilter {
    fn from(cap: Capability) -> Self {
        TypeFilter::Capability(cap)
    }
}

/// A placeholder for a name that did not resolve.
///
/// Captures the query exactly as it was made, before any normalization.
/// Proxies are never stored; [`Proxy::upgrade`] retries the lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proxy {
    /// Path of the scope the lookup started from; `None` when unset.
    pub scope: Option<PathKey>,
    /// The name as originally requested.
    pub name: SmolStr,
}

impl Proxy {
    pub fn new(scope: Option<PathKey>, name: impl AsRef<str>) -> Self {
        Self {
            scope,
            name: SmolStr::new(name.as_ref()),
        }
    }
}

/// Anything that may be handed to `register`.
#[derive(Clone, Debug)]
pub enum Registrable {
    Object(CodeObject),
    Proxy(Proxy),
}

impl From<CodeObject> for Registrable {
    fn from(object: CodeObject) -> Self {
        Registrable::Object(object)
    }
}

impl From<Proxy> for Registrable {
    fn from(proxy: Proxy) -> Self {
        Registrable::Proxy(proxy)
    }
}
