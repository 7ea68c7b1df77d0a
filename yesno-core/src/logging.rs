//! Logging macros
//!
//! Host builds log through the `log` facade, firmware builds through
//! `defmt`. With neither feature enabled the macros compile to nothing.
//! Format strings must stay within the subset both understand (`{}` and
//! `{:?}`).

#[allow(unused_macros)]
macro_rules! noop_log {
    ($($arg:tt)*) => {{
        if false {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        pub(crate) use log::{debug, error, info, warn};
    }
    else if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, error, info, warn};
    }
    else {
        pub(crate) use noop_log as debug;
        pub(crate) use noop_log as error;
        pub(crate) use noop_log as info;
        pub(crate) use noop_log as warn;
    }
}
