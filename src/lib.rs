//! # symtab
//!
//! Hierarchical symbol table for a source-documentation extractor.
//!
//! Every code object a parser discovers is stored under a unique path
//! such as `Foo::Bar` or `Foo#baz`. Short names typed in documentation are
//! resolved by searching outward through enclosing scopes, the way a
//! compiler's name resolver would.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! registry → Registry handle (store + config + persistence)
//!   ↓
//! project  → Snapshots on disk, source tree rebuild
//!   ↓
//! hir      → Code objects, namespace store, resolver
//!   ↓
//! base     → Primitives (PathKey, separators)
//! ```

/// Foundation types: PathKey, separators
pub mod base;

/// Semantic model: code objects, store, resolution
pub mod hir;

/// Snapshot persistence and source tree loading
pub mod project;

pub mod config;
pub mod error;
mod registry;

pub use base::{ISEP, NSEP, PathKey, Separator};
pub use config::{CheckpointPolicy, DEFAULT_SNAPSHOT_FILE, RegistryConfig};
pub use error::{ConfigError, LoadError, ParseError, SnapshotError};
pub use hir::{
    Capability, CodeObject, NamespaceStore, PropertyValue, Proxy, Registrable, Registrar,
    ResolveResult, Resolver, TypeFilter, TypeTag,
};
pub use project::{LoadOutcome, SourceParser};
pub use registry::Registry;
