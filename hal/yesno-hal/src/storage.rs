//! Card storage abstractions
//!
//! Provides the trait for reading files from the removable card. Paths
//! are absolute and use `/` as separator, e.g. `/yesnobutton/settings.json`.

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No card inserted, or the card could not be mounted
    NoMedium,
    /// File does not exist
    NotFound,
    /// Read failed part way through
    Io,
    /// Buffer too small for the whole file
    BufferTooSmall,
    /// Path is malformed or does not fit the path buffer
    InvalidPath,
}

/// File storage trait
///
/// Reads are blocking. Implementations only need to support reading;
/// the firmware never writes to the card.
pub trait FileStorage {
    /// Read a whole file into the provided buffer
    ///
    /// # Arguments
    /// * `path` - Absolute path of the file
    /// * `buffer` - Buffer to read data into
    ///
    /// # Returns
    /// The number of bytes read, or [`StorageError::BufferTooSmall`] if
    /// the file is larger than `buffer`.
    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Read at most `buffer.len()` bytes from the start of a file
    ///
    /// Unlike [`FileStorage::read`], a file larger than the buffer is not an
    /// error: the read stops when the buffer is full.
    fn read_prefix(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Check if a file exists
    fn exists(&mut self, path: &str) -> bool;
}

impl<T: FileStorage + ?Sized> FileStorage for &mut T {
    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(path, buffer)
    }

    fn read_prefix(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read_prefix(path, buffer)
    }

    fn exists(&mut self, path: &str) -> bool {
        (**self).exists(path)
    }
}

/// Storage for boards without a card slot, or with the card missing
///
/// Every read fails with [`StorageError::NoMedium`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl FileStorage for NoStorage {
    fn read(&mut self, _path: &str, _buffer: &mut [u8]) -> Result<usize, StorageError> {
        Err(StorageError::NoMedium)
    }

    fn read_prefix(&mut self, _path: &str, _buffer: &mut [u8]) -> Result<usize, StorageError> {
        Err(StorageError::NoMedium)
    }

    fn exists(&mut self, _path: &str) -> bool {
        false
    }
}
