//! YesNo Hardware Abstraction Layer
//!
//! This crate defines the storage abstraction the settings loader reads
//! from. The device keeps its configuration on a removable card; chip
//! specific crates (or the host backend in `yesno-hal-std`) implement the
//! trait so the same loader runs on the device, in simulators and in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (yesno-core, tools)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yesno-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  card driver  │       │ yesno-hal-std │
//! │  (on target)  │       │  (host dirs)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::FileStorage`] - Read-only access to files on the card

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod memory;
pub mod path;
pub mod storage;

// Re-export key types at crate root for convenience
#[cfg(feature = "alloc")]
pub use memory::MemoryStorage;
pub use path::{join, PathBuf, MAX_PATH_LEN};
pub use storage::{FileStorage, NoStorage, StorageError};
