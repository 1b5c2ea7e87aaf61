use crate::time::TimeDuration;
use crate::types::{CatalogError, ChannelBits, Frame, NAME_CAPACITY};
use heapless::{String, Vec};

/// A named, looping list of frames.
///
/// Sequences are validated on construction and never change afterwards.
/// Playback treats the frame list as cyclic: after the last frame comes
/// the first one again.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `embassy_time::Duration`)
/// * `C` - Number of output channels
/// * `F` - Maximum number of frames this sequence can hold
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<D: TimeDuration, const C: usize, const F: usize> {
    name: String<NAME_CAPACITY>,
    frames: Vec<Frame<D, C>, F>,
}

impl<D: TimeDuration, const C: usize, const F: usize> Sequence<D, C, F> {
    /// Creates a validated sequence.
    ///
    /// # Errors
    /// * `NameTooLong` - Name exceeds [`NAME_CAPACITY`]
    /// * `EmptySequence` - No frames were given
    /// * `CapacityExceeded` - More than `F` frames
    /// * `InvalidFrame` - A frame has zero hold time
    pub fn new(name: &str, frames: &[Frame<D, C>]) -> Result<Self, CatalogError> {
        let mut owned_name = String::new();
        owned_name
            .push_str(name)
            .map_err(|_| CatalogError::NameTooLong)?;

        if frames.is_empty() {
            return Err(CatalogError::EmptySequence);
        }

        for frame in frames {
            frame.validate()?;
        }

        let frames = Vec::from_slice(frames).map_err(|_| CatalogError::CapacityExceeded)?;

        Ok(Self {
            name: owned_name,
            frames,
        })
    }

    /// Returns the sequence name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns all frames in playback order.
    pub fn frames(&self) -> &[Frame<D, C>] {
        &self.frames
    }

    /// Returns the frame at the given index.
    pub fn frame(&self, index: usize) -> Option<&Frame<D, C>> {
        self.frames.get(index)
    }

    /// Returns the channel states of the frame at the given index.
    pub fn bits_at(&self, index: usize) -> Option<&ChannelBits<C>> {
        self.frames.get(index).map(|frame| &frame.bits)
    }

    /// Returns the number of frames. Never zero.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total hold time of one pass through every frame.
    pub fn loop_duration(&self) -> D {
        let total_millis = self
            .frames
            .iter()
            .fold(0u64, |acc, frame| acc.saturating_add(frame.hold.as_millis()));
        D::from_millis(total_millis)
    }
}
