//! Settings subsystem for the YesNo button terminal
//!
//! The device reads its operating parameters once at startup from a JSON
//! document on the SD card:
//!
//! - Remote endpoint URL and keyword
//! - Wi-Fi networks to try
//! - Button labels for transmit mode
//! - Font assets and polling interval
//! - TLS root certificate
//!
//! When the card is missing, or its document can't be used, a compiled-in
//! document is loaded instead. Everything ends up in fixed-capacity fields
//! of [`settings::Settings`], which the rest of the firmware only reads.
//!
//! ```no_run
//! use yesno_core::settings::Settings;
//! use yesno_hal::NoStorage;
//!
//! let settings = Settings::from_storage(&mut NoStorage);
//! assert!(settings.was_loaded);
//! let poll_every = settings.interval();
//! # let _ = poll_every;
//! ```
//!
//! The parser allocates while a document is being read (`alloc` must be
//! available); resolved settings never do.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod logging;
pub mod settings;

pub use settings::Settings;
