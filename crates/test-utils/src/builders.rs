#![allow(dead_code)]

use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory of fixture files that tokens can point at.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("creating temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path inside the workspace, without creating anything.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create a regular file and return its absolute path.
    pub fn file(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dir");
        }
        fs::write(&path, contents).expect("writing fixture file");
        path
    }

    /// Create a directory and return its absolute path.
    pub fn dir(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        fs::create_dir_all(&path).expect("creating fixture dir");
        path
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for raw stdin bytes.
#[derive(Debug, Default, Clone)]
pub struct InputBuilder {
    bytes: Vec<u8>,
}

impl InputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` followed by a newline.
    pub fn line(mut self, path: impl AsRef<Path>) -> Self {
        self.bytes.extend_from_slice(path.as_ref().as_os_str().as_bytes());
        self.bytes.push(b'\n');
        self
    }

    /// Append `path` followed by a NUL byte.
    pub fn record(mut self, path: impl AsRef<Path>) -> Self {
        self.bytes.extend_from_slice(path.as_ref().as_os_str().as_bytes());
        self.bytes.push(b'\0');
        self
    }

    /// Append arbitrary bytes verbatim.
    pub fn raw(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.bytes.extend_from_slice(bytes.as_ref());
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
