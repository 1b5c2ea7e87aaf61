//! Built-in five-channel catalog for a model vehicle lighting rig.
//!
//! Channel 0 and channel 4 are the outer lamps, channels 1-3 the inner row.
//! Which physical pin each channel drives is up to the renderer.

use crate::catalog::{Catalog, CatalogBuilder};
use crate::time::TimeDuration;
use crate::types::{CatalogError, Frame};

/// Channel width of the reference rig.
pub const REFERENCE_CHANNELS: usize = 5;

/// Longest reference sequence (`CYLON`, `CYLON_R`).
pub const REFERENCE_MAX_FRAMES: usize = 18;

/// Room for every reference sequence plus one custom addition.
pub const REFERENCE_MAX_SEQUENCES: usize = 16;

/// Catalog type sized for the reference data.
pub type ReferenceCatalog<D> =
    Catalog<D, REFERENCE_CHANNELS, REFERENCE_MAX_FRAMES, REFERENCE_MAX_SEQUENCES>;

/// Builder type sized for the reference data.
pub type ReferenceBuilder<D> =
    CatalogBuilder<D, REFERENCE_CHANNELS, REFERENCE_MAX_FRAMES, REFERENCE_MAX_SEQUENCES>;

/// `(pattern, hold in ms)` rows for one sequence.
pub type Rows = &'static [(&'static str, u64)];

const CYLON: Rows = &[
    ("01000", 100),
    ("00100", 100),
    ("00010", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00010", 100),
    ("00100", 100),
    ("01000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
];

const CYLON_R: Rows = &[
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("01000", 100),
    ("00100", 100),
    ("00010", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00010", 100),
    ("00100", 100),
    ("01000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
    ("00000", 100),
];

const FBREAKS: Rows = &[("01110", 1000), ("00000", 500)];
const BREAKS: Rows = &[("01110", 1000)];
const FREVERSE: Rows = &[("00001", 1000), ("00000", 500)];
const REVERSE: Rows = &[("00001", 1000)];
const FHAZARDS: Rows = &[("10000", 1000), ("00000", 500)];
const HAZARDS: Rows = &[("10000", 1000)];
const BLINK: Rows = &[("11111", 1000), ("00000", 1000)];
const BREAKSTOGGLE: Rows = &[("01010", 1000), ("00100", 1000)];
const ALL: Rows = &[("11111", 1000)];

const EIGHT: Rows = &[
    ("00001", 100),
    ("10000", 100),
    ("01000", 100),
    ("00100", 100),
    ("00010", 100),
    ("00000", 500),
];

const EIGHT_R: Rows = &[
    ("00000", 500),
    ("00001", 100),
    ("10000", 100),
    ("00010", 100),
    ("00100", 100),
    ("01000", 100),
];

const JACKPOT: Rows = &[
    ("10000", 100),
    ("01001", 100),
    ("10100", 100),
    ("00011", 100),
];

const LIGHTRUN: Rows = &[
    ("10000", 100),
    ("01000", 100),
    ("00100", 100),
    ("00010", 100),
    ("00001", 100),
];

/// Reference sequences in registration order.
pub const REFERENCE_SEQUENCES: &[(&str, Rows)] = &[
    ("CYLON", CYLON),
    ("CYLON_R", CYLON_R),
    ("FBREAKS", FBREAKS),
    ("BREAKS", BREAKS),
    ("FREVERSE", FREVERSE),
    ("REVERSE", REVERSE),
    ("FHAZARDS", FHAZARDS),
    ("HAZARDS", HAZARDS),
    ("BLINK", BLINK),
    ("BREAKSTOGGLE", BREAKSTOGGLE),
    ("ALL", ALL),
    ("EIGHT", EIGHT),
    ("EIGHT_R", EIGHT_R),
    ("JACKPOT", JACKPOT),
    ("LIGHTRUN", LIGHTRUN),
];

/// Returns a builder pre-loaded with every reference sequence.
///
/// Useful for adding custom sequences on top of the built-in ones.
pub fn reference_builder<D: TimeDuration>() -> Result<ReferenceBuilder<D>, CatalogError> {
    let mut builder = ReferenceBuilder::<D>::new();

    for &(name, rows) in REFERENCE_SEQUENCES {
        let mut frames: heapless::Vec<Frame<D, REFERENCE_CHANNELS>, REFERENCE_MAX_FRAMES> =
            heapless::Vec::new();
        for &(pattern, hold) in rows {
            let frame = Frame::from_pattern(pattern, D::from_millis(hold))?;
            frames
                .push(frame)
                .map_err(|_| CatalogError::CapacityExceeded)?;
        }
        builder.register(name, &frames)?;
    }

    Ok(builder)
}

/// Builds the reference catalog.
pub fn reference_catalog<D: TimeDuration>() -> Result<ReferenceCatalog<D>, CatalogError> {
    reference_builder().map(CatalogBuilder::build)
}
