//! Hierarchical path keys for code objects.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Namespace separator: nested-scope (module/class) membership.
pub const NSEP: &str = "::";

/// Instance separator: instance-level membership (e.g. an instance method).
pub const ISEP: &str = "#";

/// One of the two separator tokens used to join a parent path and a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Separator {
    /// `::`
    Namespace,
    /// `#`
    Instance,
}

impl Separator {
    /// Separators in resolution order: namespace membership wins ties.
    pub const ORDERED: [Separator; 2] = [Separator::Namespace, Separator::Instance];

    /// The token text.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Separator::Namespace => NSEP,
            Separator::Instance => ISEP,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical location of a code object in the hierarchy.
///
/// The empty path is reserved for the root object; there is no other
/// root marker. Paths are built with [`PathKey::join`], which yields the
/// bare name when the parent is the root.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathKey(SmolStr);

impl PathKey {
    /// The root path.
    #[inline]
    pub const fn root() -> Self {
        Self(SmolStr::new_inline(""))
    }

    /// Wrap a raw path string. No normalization is applied.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(SmolStr::new(path.as_ref()))
    }

    /// Join `name` onto this path with `sep`.
    ///
    /// Joining onto the root yields `name` unchanged.
    pub fn join(&self, sep: Separator, name: &str) -> Self {
        if self.is_root() {
            return Self::new(name);
        }
        let mut joined = String::with_capacity(self.0.len() + sep.as_str().len() + name.len());
        joined.push_str(&self.0);
        joined.push_str(sep.as_str());
        joined.push_str(name);
        Self(SmolStr::from(joined))
    }

    /// Whether this is the root path.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment of the path, after the final separator.
    pub fn name(&self) -> &str {
        match self.last_separator() {
            Some((idx, sep)) => &self.0[idx + sep.as_str().len()..],
            None => &self.0,
        }
    }

    /// The separator that precedes the last segment, if any.
    pub fn separator(&self) -> Option<Separator> {
        self.last_separator().map(|(_, sep)| sep)
    }

    /// The path with its last segment removed.
    ///
    /// Top-level paths have the root as their lexical parent; the root has none.
    pub fn lexical_parent(&self) -> Option<PathKey> {
        if self.is_root() {
            return None;
        }
        match self.last_separator() {
            Some((0, _)) | None => Some(PathKey::root()),
            Some((idx, _)) => Some(PathKey::new(&self.0[..idx])),
        }
    }

    fn last_separator(&self) -> Option<(usize, Separator)> {
        let ns = self.0.rfind(NSEP).map(|i| (i, Separator::Namespace));
        let inst = self.0.rfind(ISEP).map(|i| (i, Separator::Instance));
        match (ns, inst) {
            (Some(a), Some(b)) => Some(if a.0 > b.0 { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

impl fmt::Debug for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("PathKey(<root>)")
        } else {
            write!(f, "PathKey({})", self.0)
        }
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PathKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathKey {
    #[inline]
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathKey {
    #[inline]
    fn from(path: String) -> Self {
        Self(SmolStr::from(path))
    }
}
