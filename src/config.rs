//! Registry configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default snapshot filename, relative to the working directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = ".symtab";

/// When to write a snapshot during a full rebuild.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckpointPolicy {
    /// After every parsed file.
    #[default]
    EveryFile,
    /// After every N parsed files.
    EveryN { files: usize },
    /// Once, after the walk completes.
    AtEnd,
}

impl CheckpointPolicy {
    /// Whether a checkpoint is due after `processed` files.
    pub fn is_due(&self, processed: usize) -> bool {
        match *self {
            CheckpointPolicy::EveryFile => true,
            CheckpointPolicy::EveryN { files } => files > 0 && processed % files == 0,
            CheckpointPolicy::AtEnd => false,
        }
    }
}

/// Settings for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Where snapshots are read from and written to.
    pub snapshot_path: PathBuf,
    /// Directory walked on a full rebuild.
    pub source_root: PathBuf,
    /// File extensions (without the dot) recognized as source files.
    pub extensions: Vec<String>,
    pub checkpoint: CheckpointPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            source_root: PathBuf::from("."),
            extensions: vec!["rb".to_string()],
            checkpoint: CheckpointPolicy::default(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_checkpoint(mut self, policy: CheckpointPolicy) -> Self {
        self.checkpoint = policy;
        self
    }

    /// Whether `path` has one of the configured source extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.snapshot_path, PathBuf::from(".symtab"));
        assert_eq!(config.checkpoint, CheckpointPolicy::EveryFile);
        assert!(config.is_source_file(Path::new("lib/foo.rb")));
        assert!(!config.is_source_file(Path::new("lib/foo.rs")));
        assert!(!config.is_source_file(Path::new("Rakefile")));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "extensions": ["py"], "checkpoint": { "type": "every_n", "files": 5 } }"#;
        let config: RegistryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extensions, vec!["py".to_string()]);
        assert_eq!(config.checkpoint, CheckpointPolicy::EveryN { files: 5 });
        assert_eq!(config.snapshot_path, PathBuf::from(".symtab"));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("symtab.json");
        let json = r#"{
            "snapshot_path": "out/index.bin",
            "source_root": "lib",
            "checkpoint": { "type": "at_end" }
        }"#;
        std::fs::write(&path, json).unwrap();

        let config = RegistryConfig::from_json_file(&path).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("out/index.bin"));
        assert_eq!(config.source_root, PathBuf::from("lib"));
        assert_eq!(config.checkpoint, CheckpointPolicy::AtEnd);
        assert_eq!(config.extensions, vec!["rb".to_string()]);
    }

    #[test]
    fn test_from_json_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = RegistryConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
    }

    #[test]
    fn test_checkpoint_due() {
        assert!(CheckpointPolicy::EveryFile.is_due(1));
        assert!(!CheckpointPolicy::AtEnd.is_due(10));
        let every3 = CheckpointPolicy::EveryN { files: 3 };
        assert!(!every3.is_due(2));
        assert!(every3.is_due(3));
        assert!(!CheckpointPolicy::EveryN { files: 0 }.is_due(3));
    }
}
