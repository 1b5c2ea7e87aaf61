//! Time-driven playback of a single sequence.
//!
//! [`Player`] walks the frames of one active sequence as time is fed to it
//! through [`Player::tick`], wrapping back to the first frame after the
//! last. It never reads a clock itself; see [`crate::rig`] for the
//! clock-driven wrapper.

use crate::catalog::Catalog;
use crate::logging::{info, warn};
use crate::sequence::Sequence;
use crate::time::TimeDuration;
use crate::types::{ChannelBits, Frame};

/// Errors that can occur during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerError {
    /// No sequence has the requested name.
    NotFound,

    /// Time moved backwards or the delta could not be computed.
    InvalidDelta,
}

impl core::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlayerError::NotFound => write!(f, "no sequence with that name"),
            PlayerError::InvalidDelta => write!(f, "time delta is negative or malformed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}

/// Plays one sequence from a shared [`Catalog`] at a time.
///
/// Playback state is `(active sequence, frame index, elapsed time in frame)`.
/// The catalog is only borrowed, so several players can run off the same
/// catalog; each player must be owned by a single thread.
///
/// # Type Parameters
/// * `'c` - Lifetime of the catalog borrow
/// * `D` - The duration type
/// * `C` - Number of output channels
/// * `F` - Maximum frames per sequence
/// * `S` - Maximum sequences in the catalog
#[derive(Debug, Clone)]
pub struct Player<'c, D: TimeDuration, const C: usize, const F: usize, const S: usize> {
    catalog: &'c Catalog<D, C, F, S>,
    active: &'c Sequence<D, C, F>,
    frame_index: usize,
    elapsed: D,
}

impl<'c, D: TimeDuration, const C: usize, const F: usize, const S: usize> Player<'c, D, C, F, S> {
    /// Creates a player positioned at the start of the named sequence.
    ///
    /// # Errors
    /// * `NotFound` - No sequence has this name
    pub fn new(catalog: &'c Catalog<D, C, F, S>, name: &str) -> Result<Self, PlayerError> {
        let active = catalog.lookup(name).map_err(|_| PlayerError::NotFound)?;
        Ok(Self::starting_at(catalog, active))
    }

    /// Creates a player on the first registered sequence.
    ///
    /// # Errors
    /// * `NotFound` - The catalog is empty
    pub fn first(catalog: &'c Catalog<D, C, F, S>) -> Result<Self, PlayerError> {
        let active = catalog.first().ok_or(PlayerError::NotFound)?;
        Ok(Self::starting_at(catalog, active))
    }

    fn starting_at(catalog: &'c Catalog<D, C, F, S>, active: &'c Sequence<D, C, F>) -> Self {
        Self {
            catalog,
            active,
            frame_index: 0,
            elapsed: D::ZERO,
        }
    }

    /// Switches to the named sequence and restarts playback at its first frame.
    ///
    /// Selecting the sequence that is already playing also restarts it.
    ///
    /// # Errors
    /// * `NotFound` - No sequence has this name; playback continues untouched
    pub fn select(&mut self, name: &str) -> Result<(), PlayerError> {
        match self.catalog.lookup(name) {
            Ok(sequence) => {
                info!("selected sequence {}", sequence.name());
                self.active = sequence;
                self.restart();
                Ok(())
            }
            Err(_) => {
                warn!("unknown sequence {}, keeping {}", name, self.active.name());
                Err(PlayerError::NotFound)
            }
        }
    }

    /// Restarts the active sequence at its first frame.
    pub fn restart(&mut self) {
        self.frame_index = 0;
        self.elapsed = D::ZERO;
    }

    /// Advances playback by `delta`.
    ///
    /// Steps over as many frames as `delta` covers, wrapping at the end of the
    /// sequence. Whole loops are skipped in one step, so the result matches
    /// any series of smaller ticks with the same total.
    pub fn tick(&mut self, delta: D) {
        let delta_millis = delta.as_millis();
        if delta_millis == 0 {
            return;
        }

        // Never zero: every frame has a non-zero hold.
        let loop_millis = self.active.loop_duration().as_millis();
        let mut elapsed = self.elapsed.as_millis() + delta_millis % loop_millis;

        loop {
            let hold = self.current_frame().hold.as_millis();
            if elapsed < hold {
                break;
            }
            elapsed -= hold;
            self.frame_index = (self.frame_index + 1) % self.active.frame_count();
        }

        self.elapsed = D::from_millis(elapsed);
    }

    /// Returns the channel states to render right now.
    pub fn current_frame_bits(&self) -> ChannelBits<C> {
        self.current_frame().bits
    }

    /// Returns the frame being displayed.
    pub fn current_frame(&self) -> &'c Frame<D, C> {
        &self.active.frames()[self.frame_index]
    }

    /// Returns the time left until the next frame starts.
    pub fn remaining_in_frame(&self) -> D {
        self.current_frame().hold.saturating_sub(self.elapsed)
    }

    /// Returns the index of the displayed frame within the active sequence.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Returns the time spent in the displayed frame so far.
    pub fn elapsed(&self) -> D {
        self.elapsed
    }

    /// Returns the active sequence.
    pub fn active_sequence(&self) -> &'c Sequence<D, C, F> {
        self.active
    }

    /// Returns the name of the active sequence.
    pub fn active_name(&self) -> &'c str {
        self.active.name()
    }

    /// Returns the catalog this player selects from.
    pub fn catalog(&self) -> &'c Catalog<D, C, F, S> {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Millis;

    type TestCatalog = Catalog<Millis, 2, 4, 4>;

    fn catalog() -> TestCatalog {
        TestCatalog::builder()
            .with(
                "UNEVEN",
                &[
                    Frame::new([true, false], Millis(30)),
                    Frame::new([false, true], Millis(70)),
                    Frame::new([true, true], Millis(5)),
                ],
            )
            .unwrap()
            .build()
    }

    #[test]
    fn wraps_after_whole_loop_reduction() {
        let catalog = catalog();
        let mut player = Player::new(&catalog, "UNEVEN").unwrap();

        player.tick(Millis(20));
        // 20 + (1065 % 105 = 15) = 35 -> frame 1, 5ms in
        player.tick(Millis(1065));
        assert_eq!(player.frame_index(), 1);
        assert_eq!(player.elapsed(), Millis(5));
        assert_eq!(player.remaining_in_frame(), Millis(65));
    }

    #[test]
    fn elapsed_spilling_past_last_frame_wraps() {
        let catalog = catalog();
        let mut player = Player::new(&catalog, "UNEVEN").unwrap();

        player.tick(Millis(102));
        assert_eq!(player.frame_index(), 2);
        player.tick(Millis(4));
        assert_eq!(player.frame_index(), 0);
        assert_eq!(player.elapsed(), Millis(1));
    }

    #[test]
    fn restart_keeps_sequence() {
        let catalog = catalog();
        let mut player = Player::first(&catalog).unwrap();
        player.tick(Millis(40));
        player.restart();
        assert_eq!(player.active_name(), "UNEVEN");
        assert_eq!(player.frame_index(), 0);
        assert_eq!(player.elapsed(), Millis::ZERO);
    }

    #[test]
    fn first_on_empty_catalog_is_not_found() {
        let catalog = TestCatalog::builder().build();
        assert!(matches!(Player::first(&catalog), Err(PlayerError::NotFound)));
    }
}
