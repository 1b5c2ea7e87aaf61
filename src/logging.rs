//! Logging shims.
//!
//! Re-exports the `log` macros when the `log` feature is on, the `defmt`
//! macros when only `defmt` is on, and no-op stand-ins otherwise. Format
//! strings must stick to plain `{}` placeholders so both backends accept them.

#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::{debug, error, info, trace, warn};

#[cfg(all(feature = "defmt", not(feature = "log")))]
#[allow(unused_imports)]
pub(crate) use defmt::{debug, error, info, trace, warn};

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! discard {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
#[allow(unused_imports)]
pub(crate) use {
    discard as debug, discard as error, discard as info, discard as trace, discard as warn,
};

#[cfg(test)]
mod tests {
    use super::{debug, error, info, trace, warn};

    #[test]
    fn macros_accept_plain_placeholders() {
        let name = "CYLON";
        let index: usize = 3;
        trace!("frame {} of {}", index, name);
        debug!("registered sequence {} ({} frames)", name, index);
        info!("selected sequence {}", name);
        warn!("unknown sequence {}", name);
        error!("rejecting clock step at frame {}", index);
    }
}
