//! Bounded card paths
//!
//! Paths are built by concatenating a base directory and a file name
//! taken from the settings document. The result lives in a fixed buffer.

use heapless::String;

use crate::storage::StorageError;

/// Maximum length of an absolute card path in bytes
pub const MAX_PATH_LEN: usize = 96;

/// Fixed-capacity path buffer
pub type PathBuf = String<MAX_PATH_LEN>;

/// Concatenate path segments into a bounded path
///
/// No separator is inserted: `base` is expected to end with `/` and the
/// following segments are appended verbatim, e.g.
/// `join(&["/yesnobutton/", "font", ".vlw"])`.
///
/// Returns [`StorageError::InvalidPath`] if the result does not fit.
pub fn join(segments: &[&str]) -> Result<PathBuf, StorageError> {
    let mut path = PathBuf::new();
    for segment in segments {
        path.push_str(segment)
            .map_err(|_| StorageError::InvalidPath)?;
    }
    Ok(path)
}
