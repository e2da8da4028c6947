use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::snapshot;
use crate::config::RegistryConfig;
use crate::error::{LoadError, ParseError};
use crate::hir::{NamespaceStore, Registrar};

/// A parser that discovers code objects in one source file.
///
/// The parser is handed a [`Registrar`] and registers each object it
/// finds; it never sees the store itself.
pub trait SourceParser {
    fn parse_file(&mut self, path: &Path, registrar: &mut dyn Registrar) -> Result<(), ParseError>;
}

impl<F> SourceParser for F
where
    F: FnMut(&Path, &mut dyn Registrar) -> Result<(), ParseError>,
{
    fn parse_file(&mut self, path: &Path, registrar: &mut dyn Registrar) -> Result<(), ParseError> {
        self(path, registrar)
    }
}

/// What [`WorkspaceLoader::load`] did.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The store was replaced by the snapshot's contents.
    Restored { entries: usize },
    /// The source tree was walked and parsed.
    Rebuilt {
        files: usize,
        checkpoints: usize,
        failures: Vec<ParseError>,
    },
}

/// Loads a store from a snapshot, or rebuilds it from the source tree.
pub struct WorkspaceLoader<'c> {
    config: &'c RegistryConfig,
}

impl<'c> WorkspaceLoader<'c> {
    pub fn new(config: &'c RegistryConfig) -> Self {
        Self { config }
    }

    /// Restore `store` from `snapshot_path`, or rebuild it.
    ///
    /// The snapshot is used when it can be read and `force_rebuild` is
    /// false; a snapshot that reads but does not decode is an error and
    /// leaves `store` untouched. Otherwise every source file under the
    /// configured root is handed to `parser`, which registers into the
    /// current store, and snapshots are written per the checkpoint policy.
    pub fn load(
        &self,
        store: &mut NamespaceStore,
        parser: &mut dyn SourceParser,
        force_rebuild: bool,
        snapshot_path: &Path,
    ) -> Result<LoadOutcome, LoadError> {
        if !force_rebuild {
            match fs::read(snapshot_path) {
                Ok(bytes) => {
                    *store = snapshot::decode(&bytes)?;
                    info!(
                        path = %snapshot_path.display(),
                        entries = store.len(),
                        "restored snapshot"
                    );
                    return Ok(LoadOutcome::Restored { entries: store.len() });
                }
                Err(e) => {
                    debug!(
                        path = %snapshot_path.display(),
                        error = %e,
                        "snapshot unavailable, rebuilding"
                    );
                }
            }
        }
        self.rebuild(store, parser, snapshot_path)
    }

    fn rebuild(
        &self,
        store: &mut NamespaceStore,
        parser: &mut dyn SourceParser,
        snapshot_path: &Path,
    ) -> Result<LoadOutcome, LoadError> {
        let paths = self.collect_file_paths()?;
        let policy = self.config.checkpoint;
        let mut failures = Vec::new();
        let mut checkpoints = 0;
        let mut pending = false;

        for (idx, path) in paths.iter().enumerate() {
            if let Err(e) = parser.parse_file(path, &mut *store) {
                warn!(error = %e, "parse failed");
                failures.push(e);
            }
            pending = true;

            if policy.is_due(idx + 1) {
                snapshot::save(store, snapshot_path)?;
                checkpoints += 1;
                pending = false;
            }
        }

        if pending || checkpoints == 0 {
            snapshot::save(store, snapshot_path)?;
            checkpoints += 1;
        }

        info!(
            files = paths.len(),
            failures = failures.len(),
            entries = store.len(),
            "rebuilt from source tree"
        );
        Ok(LoadOutcome::Rebuilt {
            files: paths.len(),
            checkpoints,
            failures,
        })
    }

    /// All source files under the configured root, sorted by path.
    pub fn collect_file_paths(&self) -> Result<Vec<PathBuf>, walkdir::Error> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.config.source_root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.config.is_source_file(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }
}
