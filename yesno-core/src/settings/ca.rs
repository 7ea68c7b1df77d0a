//! Root certificate loading

use yesno_hal::{join, FileStorage, StorageError};

use super::defaults::DEFAULT_ROOT_CA;
use super::types::{truncated, CaSource, Settings, BASE_DIR, SETTINGS_MAX_CA};
use crate::logging::{debug, info, warn};

impl Settings {
    /// Load the root certificate named by `ca_file`
    ///
    /// The file is read up to the certificate capacity; anything past it
    /// is ignored. If `ca_file` is empty or was cut short, or the file is
    /// missing or yields no text, the compiled-in certificate is used.
    /// `root_ca` is never empty afterwards.
    pub fn load_ca<S: FileStorage>(&mut self, storage: &mut S) {
        self.root_ca.clear();
        self.ca_source = CaSource::Default;

        if self.ca_file_truncated {
            warn!("Certificate file name truncated, not reading it from card");
        } else if !self.ca_file.is_empty() {
            match self.read_ca(storage) {
                Ok(len) if !self.root_ca.is_empty() => {
                    debug!("Read {} bytes of root certificate from card", len);
                    self.ca_source = CaSource::Storage;
                }
                Ok(_) => warn!("Root certificate {} is empty", self.ca_file.as_str()),
                Err(e) => debug!(
                    "Root certificate {} not read: {:?}",
                    self.ca_file.as_str(),
                    e
                ),
            }
        }

        if self.root_ca.is_empty() {
            self.root_ca = truncated(DEFAULT_ROOT_CA);
        }
        info!("Using {:?} root certificate", self.ca_source);
    }

    fn read_ca<S: FileStorage>(&mut self, storage: &mut S) -> Result<usize, StorageError> {
        let path = join(&[BASE_DIR, self.ca_file.as_str()])?;
        let mut buffer = [0u8; SETTINGS_MAX_CA - 1];
        let len = storage.read_prefix(&path, &mut buffer)?;
        self.root_ca = truncated(utf8_prefix(&buffer[..len]));
        Ok(len)
    }
}

/// Longest valid UTF-8 prefix of `bytes`
///
/// A capped read can end in the middle of a character.
fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}
