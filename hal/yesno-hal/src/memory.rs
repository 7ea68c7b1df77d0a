//! In-RAM storage backend
//!
//! Holds a set of files in memory. Used by simulators and by tests that
//! need a card with specific contents.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::storage::{FileStorage, StorageError};

/// Card image kept in RAM
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<String, Vec<u8>>,
    ejected: bool,
}

impl MemoryStorage {
    /// Create an empty card
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any existing one at `path`
    pub fn with_file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add a file, replacing any existing one at `path`
    pub fn insert(&mut self, path: &str, contents: impl AsRef<[u8]>) {
        self.files.insert(String::from(path), contents.as_ref().to_vec());
    }

    /// Remove a file
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    /// Simulate pulling the card out (or putting it back)
    pub fn set_ejected(&mut self, ejected: bool) {
        self.ejected = ejected;
    }

    fn lookup(&self, path: &str) -> Result<&[u8], StorageError> {
        if self.ejected {
            return Err(StorageError::NoMedium);
        }
        self.files
            .get(path)
            .map(Vec::as_slice)
            .ok_or(StorageError::NotFound)
    }
}

impl FileStorage for MemoryStorage {
    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let data = self.lookup(path)?;
        if buffer.len() < data.len() {
            return Err(StorageError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn read_prefix(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let data = self.lookup(path)?;
        let len = data.len().min(buffer.len());
        buffer[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }

    fn exists(&mut self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_whole_file() {
        let mut card = MemoryStorage::new().with_file("/a.txt", "hello");
        let mut buffer = [0u8; 16];

        let len = card.read("/a.txt", &mut buffer).unwrap();
        assert_eq!(&buffer[..len], b"hello");
    }

    #[test]
    fn test_read_too_large() {
        let mut card = MemoryStorage::new().with_file("/a.txt", "hello");
        let mut buffer = [0u8; 4];

        assert_eq!(
            card.read("/a.txt", &mut buffer),
            Err(StorageError::BufferTooSmall)
        );
    }

    #[test]
    fn test_read_prefix_truncates() {
        let mut card = MemoryStorage::new().with_file("/a.txt", "hello");
        let mut buffer = [0u8; 4];

        let len = card.read_prefix("/a.txt", &mut buffer).unwrap();
        assert_eq!(&buffer[..len], b"hell");
    }

    #[test]
    fn test_missing_and_ejected() {
        let mut card = MemoryStorage::new().with_file("/a.txt", "hello");
        let mut buffer = [0u8; 16];

        assert_eq!(card.read("/b.txt", &mut buffer), Err(StorageError::NotFound));
        assert!(card.exists("/a.txt"));

        card.set_ejected(true);
        assert_eq!(card.read("/a.txt", &mut buffer), Err(StorageError::NoMedium));
        assert!(!card.exists("/a.txt"));
    }

    #[test]
    fn test_remove_file() {
        let mut card = MemoryStorage::new().with_file("/a.txt", "hello");

        assert_eq!(card.remove("/a.txt").as_deref(), Some(&b"hello"[..]));
        assert!(!card.exists("/a.txt"));
        assert_eq!(card.remove("/a.txt"), None);
    }
}
