//! Host filesystem backend
//!
//! Maps card paths onto a directory of the host, so a copy of an SD card
//! (or a directory laid out like one) can be loaded by host tools and
//! simulators exactly as the device would.
//!
//! `/yesnobutton/settings.json` resolves to `<root>/yesnobutton/settings.json`.

#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use log::{debug, trace};
pub use yesno_hal::{FileStorage, StorageError};

/// Directory acting as the card root
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    /// Use `root` as the mount point of the card
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Card root on the host
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an absolute card path to a host path
    ///
    /// Only plain components are accepted; `..`, `.` and prefixes are
    /// rejected so a settings document can't reach outside the card.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = path.strip_prefix('/').ok_or(StorageError::InvalidPath)?;
        let mut resolved = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                _ => return Err(StorageError::InvalidPath),
            }
        }
        Ok(resolved)
    }

    fn open(&self, path: &str) -> Result<File, StorageError> {
        if !self.root.is_dir() {
            debug!("Card root {} is not a directory", self.root.display());
            return Err(StorageError::NoMedium);
        }
        let host_path = self.resolve(path)?;
        trace!("Opening {} as {}", path, host_path.display());
        File::open(&host_path).map_err(map_io_error)
    }
}

fn map_io_error(e: io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Io,
    }
}

impl FileStorage for DirectoryStorage {
    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut file = self.open(path)?;
        let len = file.metadata().map_err(map_io_error)?.len();
        if len > buffer.len() as u64 {
            return Err(StorageError::BufferTooSmall);
        }
        read_into(&mut file, buffer)
    }

    fn read_prefix(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut file = self.open(path)?;
        read_into(&mut file, buffer)
    }

    fn exists(&mut self, path: &str) -> bool {
        self.root.is_dir()
            && self
                .resolve(path)
                .map(|host_path| host_path.is_file())
                .unwrap_or(false)
    }
}

/// Fill `buffer` from `file` until either is exhausted
fn read_into(file: &mut File, buffer: &mut [u8]) -> Result<usize, StorageError> {
    let mut filled = 0;
    while filled < buffer.len() {
        match file.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_io_error(e)),
        }
    }
    Ok(filled)
}
