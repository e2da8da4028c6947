//! Persistence — snapshots on disk and rebuilding from the source tree.

pub mod snapshot;
mod workspace_loader;

pub use snapshot::{MAGIC, Snapshot, SnapshotEntry};
pub use workspace_loader::{LoadOutcome, SourceParser, WorkspaceLoader};
