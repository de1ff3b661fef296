//! File handles the importer reads from

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// An opaque binary file resource
///
/// The importer reads it exactly once, in full.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Label used in logs and error messages
    fn name(&self) -> String;

    /// Read the whole resource into memory
    async fn read_all(&self) -> io::Result<Vec<u8>>;
}

/// A file on the local filesystem
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for PathSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// A payload the host has already buffered, e.g. an upload body
#[derive(Debug, Clone)]
pub struct BytesSource {
    name: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl FileSource for BytesSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
