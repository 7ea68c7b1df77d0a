//! Device settings
//!
//! Loads the settings document from the card, falling back to the
//! compiled-in document, and resolves it into fixed-capacity fields.

mod ca;
pub mod defaults;
mod json;
pub mod loader;
pub mod parse;
pub mod types;

pub use defaults::{DEFAULT_ROOT_CA, DEFAULT_SETTINGS};
pub use parse::ParseError;
pub use types::*;
