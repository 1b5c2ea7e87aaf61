//! Core types for catalog construction.

use crate::time::TimeDuration;

/// Maximum length of a sequence name, in bytes.
pub const NAME_CAPACITY: usize = 16;

/// Fixed-width on/off state for every output channel.
pub type ChannelBits<const C: usize> = [bool; C];

/// A single frame: which channels are lit, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<D: TimeDuration, const C: usize> {
    /// Channel states, index `i` drives channel `i`.
    pub bits: ChannelBits<C>,

    /// How long the frame is held before advancing.
    pub hold: D,
}

impl<D: TimeDuration, const C: usize> Frame<D, C> {
    /// Creates a new frame.
    #[inline]
    pub const fn new(bits: ChannelBits<C>, hold: D) -> Self {
        Self { bits, hold }
    }

    /// Creates a frame from a channel slice.
    ///
    /// # Errors
    /// * `InvalidFrame` - The slice length is not exactly `C`
    pub fn from_slice(bits: &[bool], hold: D) -> Result<Self, CatalogError> {
        let bits: ChannelBits<C> = bits.try_into().map_err(|_| CatalogError::InvalidFrame)?;
        Ok(Self::new(bits, hold))
    }

    /// Creates a frame from a bit mask where bit `i` drives channel `i`.
    ///
    /// # Errors
    /// * `InvalidFrame` - `C` exceeds 32, or a bit at or above `C` is set
    pub fn from_mask(mask: u32, hold: D) -> Result<Self, CatalogError> {
        if C > 32 || (C < 32 && mask >> C != 0) {
            return Err(CatalogError::InvalidFrame);
        }

        let mut bits = [false; C];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = mask & (1u32 << i) != 0;
        }
        Ok(Self::new(bits, hold))
    }

    /// Creates a frame from a `'0'`/`'1'` pattern such as `"01110"`.
    ///
    /// The leftmost character is channel 0.
    ///
    /// # Errors
    /// * `InvalidFrame` - Wrong length or a character other than `'0'` or `'1'`
    pub fn from_pattern(pattern: &str, hold: D) -> Result<Self, CatalogError> {
        if pattern.len() != C {
            return Err(CatalogError::InvalidFrame);
        }

        let mut bits = [false; C];
        for (bit, ch) in bits.iter_mut().zip(pattern.bytes()) {
            *bit = match ch {
                b'0' => false,
                b'1' => true,
                _ => return Err(CatalogError::InvalidFrame),
            };
        }
        Ok(Self::new(bits, hold))
    }

    /// Returns the channel states as a mask, bit `i` for channel `i`.
    ///
    /// Channels past 32 are ignored.
    pub fn mask(&self) -> u32 {
        self.bits
            .iter()
            .take(32)
            .enumerate()
            .fold(0u32, |acc, (i, &on)| if on { acc | (1u32 << i) } else { acc })
    }

    /// Returns true if no channel is lit.
    #[inline]
    pub fn is_dark(&self) -> bool {
        self.bits.iter().all(|&on| !on)
    }

    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        if self.hold.as_millis() == 0 {
            return Err(CatalogError::InvalidFrame);
        }
        Ok(())
    }
}

/// Catalog construction and lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// A sequence with this name is already registered.
    DuplicateName,

    /// No frames provided.
    EmptySequence,

    /// A frame has zero hold time or the wrong channel width.
    InvalidFrame,

    /// Name longer than [`NAME_CAPACITY`].
    NameTooLong,

    /// Frame or sequence capacity exceeded.
    CapacityExceeded,

    /// No sequence has this name.
    NotFound,
}

impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CatalogError::DuplicateName => write!(f, "sequence name already registered"),
            CatalogError::EmptySequence => write!(f, "sequence must have at least one frame"),
            CatalogError::InvalidFrame => {
                write!(
                    f,
                    "frame must have a non-zero hold time and one state per channel"
                )
            }
            CatalogError::NameTooLong => {
                write!(f, "sequence name exceeds {} bytes", NAME_CAPACITY)
            }
            CatalogError::CapacityExceeded => write!(f, "catalog capacity exceeded"),
            CatalogError::NotFound => write!(f, "no sequence with that name"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CatalogError {}
