//! Artifact persistence.
//!
//! Charts and the cleaned CSV are produced as bytes; an [`ArtifactSink`]
//! decides where they end up.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for named output files.
pub trait ArtifactSink {
    /// Store `bytes` under `name`, replacing anything stored there before.
    fn persist(&mut self, name: &str, bytes: &[u8]) -> Result<(), SinkError>;
}

/// Writes artifacts as files in one directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn persist(&mut self, name: &str, bytes: &[u8]) -> Result<(), SinkError> {
        let path = self.dir.join(name);
        let write_err = |source: std::io::Error| SinkError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(&path, bytes).map_err(write_err)?;

        info!(path = %path.display(), bytes = bytes.len(), "Artifact written");
        Ok(())
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.artifacts.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> Vec<&str> {
        self.artifacts.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn persist(&mut self, name: &str, bytes: &[u8]) -> Result<(), SinkError> {
        self.artifacts.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}
