//! Settings type definitions
//!
//! Every field coming from the settings document is stored in a fixed
//! capacity container. Capacities match the device firmware's buffers and
//! count a string terminator, so a field of capacity
//! `N` holds at most `N - 1` bytes of text. Longer values are truncated,
//! never rejected.

use heapless::{String, Vec};
use yesno_hal::{PathBuf, StorageError};

#[cfg(feature = "serde")]
use serde::Serialize;

use super::parse::ParseError;

/// Directory on the card holding every settings related file
pub const BASE_DIR: &str = "/yesnobutton/";

/// Settings document file name, relative to [`BASE_DIR`]
pub const SETTINGS_FILE: &str = "settings.json";

/// Extension appended to font names when probing the card
pub const FONT_EXTENSION: &str = ".vlw";

/// Maximum Wi-Fi networks
pub const SETTINGS_MAX_WIFI: usize = 10;

/// SSID capacity, including terminator
pub const SETTINGS_MAX_SSID: usize = 80;

/// Wi-Fi password capacity, including terminator
pub const SETTINGS_MAX_PASSWORD: usize = 80;

/// Root certificate capacity, including terminator
pub const SETTINGS_MAX_CA: usize = 2000;

/// Button label capacity, including terminator
pub const SETTINGS_MAX_BUTTONNAME: usize = 5;

/// Number of buttons on the device
pub const SETTINGS_BUTTON_COUNT: usize = 4;

/// Endpoint URL capacity, including terminator
pub const SETTINGS_MAX_URL: usize = 256;

/// Keyword capacity, including terminator
pub const SETTINGS_MAX_KEYWORD: usize = 64;

/// Certificate file name capacity, including terminator
pub const SETTINGS_MAX_FILENAME: usize = 64;

/// Largest settings document accepted, in bytes
pub const SETTINGS_MAX_DOCUMENT: usize = 4096;

pub type Url = String<{ SETTINGS_MAX_URL - 1 }>;
pub type Keyword = String<{ SETTINGS_MAX_KEYWORD - 1 }>;
pub type FileName = String<{ SETTINGS_MAX_FILENAME - 1 }>;
pub type Ssid = String<{ SETTINGS_MAX_SSID - 1 }>;
pub type Password = String<{ SETTINGS_MAX_PASSWORD - 1 }>;
pub type ButtonLabel = String<{ SETTINGS_MAX_BUTTONNAME - 1 }>;
pub type RootCa = String<{ SETTINGS_MAX_CA - 1 }>;

/// Append as much of `src` as fits into `dst`
///
/// Stops at the last UTF-8 character boundary that fits. Returns `true`
/// if all of `src` was appended.
pub fn push_truncated<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    let room = N - dst.len();
    let mut end = src.len().min(room);
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    // Fits by construction
    let _ = dst.push_str(&src[..end]);
    end == src.len()
}

/// Copy `src` into a new bounded string, truncating if needed
pub fn truncated<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    push_truncated(&mut out, src);
    out
}

/// One Wi-Fi network the device may join
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WifiCredential {
    /// Network name
    pub ssid: Ssid,
    /// Passphrase
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub password: Password,
}

impl core::fmt::Debug for WifiCredential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WifiCredential")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WifiCredential {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "WifiCredential {{ ssid: {}, password: <redacted> }}",
            self.ssid.as_str()
        )
    }
}

/// A font asset on the card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FontAsset {
    /// Base-directory-prefixed name, without extension
    pub name: PathBuf,
    /// `<name>.vlw` existed on the card when the settings were parsed
    pub available: bool,
}

impl FontAsset {
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            available: false,
        }
    }
}

/// Where the root certificate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CaSource {
    /// Compiled-in certificate
    #[default]
    Default,
    /// File named by `ca_file`
    Storage,
}

/// Why the compiled-in settings document was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fallback {
    /// The settings file could not be read
    Storage(StorageError),
    /// The settings file was read but is not a usable document
    Document(ParseError),
}

impl From<StorageError> for Fallback {
    fn from(e: StorageError) -> Self {
        Fallback::Storage(e)
    }
}

impl From<ParseError> for Fallback {
    fn from(e: ParseError) -> Self {
        Fallback::Document(e)
    }
}

const EMPTY_LABEL: ButtonLabel = String::new();

/// Resolved device settings
///
/// Constructed once at startup and filled by [`Settings::load`]. After
/// that the value is only read.
///
/// `Debug` and `defmt::Format` redact the keyword; Wi-Fi passwords are
/// redacted by [`WifiCredential`].
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Settings {
    /// A document (from the card or compiled in) was parsed
    pub was_loaded: bool,
    /// The document came from the card
    pub exists_on_storage: bool,
    /// Reason the compiled-in document was used, if it was
    #[cfg_attr(feature = "serde", serde(skip))]
    pub fallback: Option<Fallback>,
    /// Remote endpoint URL
    pub end_point: Url,
    /// Filter/auth keyword sent to the endpoint
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub keyword: Keyword,
    /// Root certificate file name, relative to [`BASE_DIR`]
    pub ca_file: FileName,
    /// The document's `ca_file` did not fit and was cut short
    #[cfg_attr(feature = "serde", serde(skip))]
    pub ca_file_truncated: bool,
    /// Known Wi-Fi networks in document order
    pub wifi: Vec<WifiCredential, SETTINGS_MAX_WIFI>,
    /// Root certificate PEM text
    pub root_ca: RootCa,
    /// Where `root_ca` came from
    pub ca_source: CaSource,
    /// Transmit mode: the buttons send answers
    pub is_transmitter: bool,
    /// Show message descriptions on screen
    pub enable_description: bool,
    /// Labels for the buttons in transmit mode
    pub button_labels: [ButtonLabel; SETTINGS_BUTTON_COUNT],
    /// Polling interval
    pub interval_minutes: f32,
    pub small_font: FontAsset,
    pub medium_font: FontAsset,
    pub large_font: FontAsset,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create empty settings, ready for [`Settings::load`]
    pub const fn new() -> Self {
        Self {
            was_loaded: false,
            exists_on_storage: false,
            fallback: None,
            end_point: String::new(),
            keyword: String::new(),
            ca_file: String::new(),
            ca_file_truncated: false,
            wifi: Vec::new(),
            root_ca: String::new(),
            ca_source: CaSource::Default,
            is_transmitter: false,
            enable_description: false,
            button_labels: [EMPTY_LABEL; SETTINGS_BUTTON_COUNT],
            interval_minutes: 2.0,
            small_font: FontAsset::new(),
            medium_font: FontAsset::new(),
            large_font: FontAsset::new(),
        }
    }

    /// Number of Wi-Fi networks
    pub fn wifi_count(&self) -> usize {
        self.wifi.len()
    }

    /// Polling interval in milliseconds
    ///
    /// `interval_minutes` must be finite and non-negative; negative values
    /// saturate to 0 and huge ones to `u32::MAX`.
    pub fn interval_milliseconds(&self) -> u32 {
        (self.interval_minutes * 60.0 * 1000.0) as u32
    }

    /// Polling interval as a [`core::time::Duration`]
    pub fn interval(&self) -> core::time::Duration {
        core::time::Duration::from_millis(u64::from(self.interval_milliseconds()))
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("was_loaded", &self.was_loaded)
            .field("exists_on_storage", &self.exists_on_storage)
            .field("fallback", &self.fallback)
            .field("end_point", &self.end_point)
            .field("keyword", &redacted(&self.keyword))
            .field("ca_file", &self.ca_file)
            .field("ca_file_truncated", &self.ca_file_truncated)
            .field("wifi", &self.wifi)
            .field("root_ca", &self.root_ca)
            .field("ca_source", &self.ca_source)
            .field("is_transmitter", &self.is_transmitter)
            .field("enable_description", &self.enable_description)
            .field("button_labels", &self.button_labels)
            .field("interval_minutes", &self.interval_minutes)
            .field("small_font", &self.small_font)
            .field("medium_font", &self.medium_font)
            .field("large_font", &self.large_font)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Settings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Settings {{ was_loaded: {}, exists_on_storage: {}, fallback: {}, end_point: {}, keyword: {}, ca_file: {}, wifi: {}, root_ca: {} bytes, ca_source: {}, is_transmitter: {}, enable_description: {}, button_labels: {}, interval_minutes: {}, fonts: {} {} {} }}",
            self.was_loaded,
            self.exists_on_storage,
            self.fallback,
            self.end_point.as_str(),
            redacted(&self.keyword),
            self.ca_file.as_str(),
            self.wifi.as_slice(),
            self.root_ca.len(),
            self.ca_source,
            self.is_transmitter,
            self.enable_description,
            self.button_labels,
            self.interval_minutes,
            self.small_font,
            self.medium_font,
            self.large_font
        )
    }
}
