//! Settings loading
//!
//! Loads the settings document from the card.
//! Falls back to the compiled-in document if the card has none, or if the
//! one it has can't be read or parsed.

use core::str;

use yesno_hal::{join, FileStorage, StorageError};

use super::defaults::DEFAULT_SETTINGS;
use super::parse::ParseError;
use super::types::{Fallback, Settings, BASE_DIR, SETTINGS_FILE, SETTINGS_MAX_DOCUMENT};
use crate::logging::{debug, error, info, warn};

impl Settings {
    /// Create settings and load them from `storage`
    pub fn from_storage<S: FileStorage>(storage: &mut S) -> Self {
        let mut settings = Self::new();
        settings.load(storage);
        settings
    }

    /// Load settings from the card, or the compiled-in defaults
    ///
    /// Returns `was_loaded`. Card and document problems are not errors:
    /// they select the compiled-in document and are recorded in
    /// `fallback`. Only a compiled-in document that fails to parse
    /// returns `false`, which the build script already rules out.
    pub fn load<S: FileStorage>(&mut self, storage: &mut S) -> bool {
        info!("Loading settings from {}{}", BASE_DIR, SETTINGS_FILE);
        self.was_loaded = false;

        match self.load_from_storage(storage) {
            Ok(()) => {
                info!("Loaded settings from card");
                self.exists_on_storage = true;
                self.fallback = None;
                self.was_loaded = true;
            }
            Err(reason) => {
                match reason {
                    Fallback::Storage(StorageError::NotFound | StorageError::NoMedium) => {
                        debug!("No settings on card ({:?}), using defaults", reason)
                    }
                    _ => warn!("Failed to load settings: {:?}, using defaults", reason),
                }
                self.exists_on_storage = false;
                self.fallback = Some(reason);
                self.was_loaded = match self.parse(DEFAULT_SETTINGS, storage) {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Compiled-in settings failed to parse: {:?}", e);
                        false
                    }
                };
            }
        }

        if self.was_loaded {
            log_settings_summary(self);
        }
        self.was_loaded
    }

    /// Read and parse the settings document on the card
    fn load_from_storage<S: FileStorage>(&mut self, storage: &mut S) -> Result<(), Fallback> {
        let path = join(&[BASE_DIR, SETTINGS_FILE])?;

        let mut buffer = [0u8; SETTINGS_MAX_DOCUMENT];
        let len = storage.read(&path, &mut buffer).map_err(|e| match e {
            StorageError::BufferTooSmall => Fallback::Document(ParseError::TooLarge),
            e => Fallback::Storage(e),
        })?;

        debug!("Read {} bytes of settings from card", len);

        let document = str::from_utf8(&buffer[..len]).map_err(|_| ParseError::Malformed)?;
        self.parse(document, storage)?;
        Ok(())
    }
}

/// Log a summary of the loaded settings
fn log_settings_summary(settings: &Settings) {
    info!(
        "Settings loaded ({})",
        if settings.exists_on_storage {
            "card"
        } else {
            "defaults"
        }
    );
    debug!("  endpoint: {}", settings.end_point.as_str());
    debug!("  {} Wi-Fi networks", settings.wifi_count());
    debug!("  transmitter: {}", settings.is_transmitter);
    debug!("  interval: {} ms", settings.interval_milliseconds());
    debug!(
        "  fonts: small={} medium={} large={}",
        settings.small_font.available,
        settings.medium_font.available,
        settings.large_font.available
    );
    debug!("  root certificate: {:?}", settings.ca_source);
}
