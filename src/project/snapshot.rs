//! On-disk snapshots of the namespace store.
//!
//! The store is written as a flat list of entries, one per code object,
//! each naming its parent by path rather than by reference. Loading is
//! two-pass: every node is created first, then parent links are wired by
//! path lookup. The encoding is postcard behind a fixed header; there is
//! no schema version.

use std::fs;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::{info, warn};

use crate::base::PathKey;
use crate::error::SnapshotError;
use crate::hir::{Capability, CodeObject, NamespaceStore, PropertyValue, TypeTag};

/// File header identifying a snapshot.
pub const MAGIC: &[u8; 8] = b"SYMTAB\0\0";

/// One code object in flat form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub path: PathKey,
    pub parent_path: Option<PathKey>,
    pub kind: TypeTag,
    pub capabilities: Vec<Capability>,
    pub payload: IndexMap<SmolStr, PropertyValue>,
}

impl From<&CodeObject> for SnapshotEntry {
    fn from(obj: &CodeObject) -> Self {
        Self {
            path: obj.path.clone(),
            parent_path: obj.parent.clone(),
            kind: obj.kind.clone(),
            capabilities: obj.capabilities.clone(),
            payload: obj.payload.clone(),
        }
    }
}

/// The whole store in flat form, root included, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Flatten a store.
    pub fn capture(store: &NamespaceStore) -> Self {
        Self {
            entries: store.iter().map(SnapshotEntry::from).collect(),
        }
    }

    /// Rebuild a store from the flat entries.
    pub fn restore(self) -> Result<NamespaceStore, SnapshotError> {
        // Pass 1: create every node, parents unlinked.
        let mut objects: IndexMap<PathKey, CodeObject> =
            IndexMap::with_capacity(self.entries.len());
        let mut parent_paths: Vec<Option<PathKey>> = Vec::with_capacity(self.entries.len());

        for entry in self.entries {
            if objects.contains_key(&entry.path) {
                return Err(SnapshotError::DuplicatePath(entry.path));
            }
            if entry.path.is_root() && entry.kind != TypeTag::ROOT {
                return Err(SnapshotError::EmptyPath);
            }
            parent_paths.push(entry.parent_path);
            let obj = CodeObject {
                path: entry.path.clone(),
                parent: None,
                kind: entry.kind,
                capabilities: entry.capabilities,
                payload: entry.payload,
            };
            objects.insert(entry.path, obj);
        }

        if !objects.contains_key("") {
            return Err(SnapshotError::MissingRoot);
        }

        // Pass 2: wire parent links by path.
        for (idx, parent) in parent_paths.into_iter().enumerate() {
            let Some(parent) = parent else { continue };
            if !objects.contains_key(&parent) {
                if let Some((path, _)) = objects.get_index(idx) {
                    warn!(%path, %parent, "snapshot parent is not in the snapshot");
                }
            }
            if let Some((_, obj)) = objects.get_index_mut(idx) {
                obj.parent = Some(parent);
            }
        }

        Ok(NamespaceStore::from_objects(objects))
    }

    /// Encode with the snapshot header.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let body = postcard::to_stdvec(self).map_err(SnapshotError::Encode)?;
        let mut bytes = Vec::with_capacity(MAGIC.len() + body.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Decode bytes produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let body = bytes.strip_prefix(MAGIC.as_slice()).ok_or(SnapshotError::BadMagic)?;
        postcard::from_bytes(body).map_err(SnapshotError::Decode)
    }
}

/// Write `store` to `path`, replacing any existing file.
///
/// Not atomic: a failure mid-write leaves a truncated file behind.
pub fn save(store: &NamespaceStore, path: &Path) -> Result<(), SnapshotError> {
    let bytes = Snapshot::capture(store).to_bytes()?;
    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(path).map_err(io_err)?;
    file.write_all(&bytes).map_err(io_err)?;
    info!(path = %path.display(), entries = store.len() + 1, "saved snapshot");
    Ok(())
}

/// Decode a snapshot that has already been read from disk.
pub fn decode(bytes: &[u8]) -> Result<NamespaceStore, SnapshotError> {
    Snapshot::from_bytes(bytes)?.restore()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> NamespaceStore {
        let mut store = NamespaceStore::new();
        store.register(CodeObject::at_path("Foo", "module").with_capability(Capability::NAMESPACE));
        store.register(
            CodeObject::at_path("Foo#bar", "method")
                .with_property("docstring", "Returns bar.")
                .with_property("line", 3i64),
        );
        store
    }

    #[test]
    fn test_capture_includes_root_first() {
        let snapshot = Snapshot::capture(&sample_store());
        assert_eq!(snapshot.entries.len(), 3);
        assert!(snapshot.entries[0].path.is_root());
        assert_eq!(snapshot.entries[2].parent_path, Some(PathKey::new("Foo")));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let store = sample_store();
        let bytes = Snapshot::capture(&store).to_bytes().unwrap();
        assert!(bytes.starts_with(MAGIC));
        let restored = decode(&bytes).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_bad_magic() {
        let err = decode(b"not a snapshot").unwrap_err();
        assert!(matches!(err, SnapshotError::BadMagic));
    }

    #[test]
    fn test_truncated_body() {
        let bytes = Snapshot::capture(&sample_store()).to_bytes().unwrap();
        let err = decode(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, SnapshotError::Decode(_)));
    }

    #[test]
    fn test_missing_root_rejected() {
        let mut snapshot = Snapshot::capture(&sample_store());
        snapshot.entries.remove(0);
        assert!(matches!(snapshot.restore(), Err(SnapshotError::MissingRoot)));
    }

    #[test]
    fn test_empty_path_requires_root_tag() {
        let mut snapshot = Snapshot::capture(&sample_store());
        snapshot.entries[0].kind = TypeTag::from("class");
        assert!(matches!(snapshot.restore(), Err(SnapshotError::EmptyPath)));
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut snapshot = Snapshot::capture(&sample_store());
        let dup = snapshot.entries[1].clone();
        snapshot.entries.push(dup);
        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::DuplicatePath(p)) if p.as_str() == "Foo"
        ));
    }

    #[test]
    fn test_unknown_parent_kept() {
        let mut store = NamespaceStore::new();
        store.register(CodeObject::at_path("Lost::Child", "class"));
        let restored = Snapshot::capture(&store).restore().unwrap();
        assert_eq!(restored.at("Lost::Child").unwrap().parent, Some(PathKey::new("Lost")));
    }
}
