//! Compiled-in fallback documents
//!
//! Used when the card is missing or its files can't be used. Both files
//! are checked by the build script, so a defective default never ships.

/// Settings document used without a card
///
/// Edit `assets/settings.json` (Wi-Fi in particular) to run the device
/// without a card. Note the document spells the transmitter key
/// `is_transmittrer`, which the parser does not read: the default is
/// always receive mode.
pub const DEFAULT_SETTINGS: &str = include_str!("../../assets/settings.json");

/// Root certificate used when `ca_file` is empty or unreadable
///
/// GlobalSign Root CA - R2, served by script.google.com as of 2020/08.
pub const DEFAULT_ROOT_CA: &str = include_str!("../../assets/rootca.crt");
