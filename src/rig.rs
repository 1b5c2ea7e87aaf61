//! Clock-driven playback onto physical outputs.
//!
//! Provides [`LightRig`], which pairs a [`Player`] with a [`ChannelOutput`] and
//! a [`TimeSource`], and the [`ChannelOutput`] trait for hardware abstraction.

use crate::catalog::Catalog;
use crate::command::RigAction;
use crate::logging::{error, trace, warn};
use crate::player::{Player, PlayerError};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::ChannelBits;

/// Trait for abstracting a bank of on/off outputs.
///
/// Implement this for your hardware (GPIO pins, shift registers, etc.) to
/// allow a rig to drive it.
pub trait ChannelOutput<const C: usize> {
    /// Drives every channel to the given state.
    ///
    /// Index `i` of `bits` is channel `i`. Handle any hardware errors
    /// internally - this method cannot fail.
    fn set_channels(&mut self, bits: &ChannelBits<C>);
}

/// What to do when the clock reports an earlier instant than last time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeltaPolicy {
    /// Treat the step as zero, re-anchor on the new instant and keep playing.
    #[default]
    Clamp,

    /// Report `InvalidDelta` and leave playback untouched.
    Reject,
}

/// Runtime settings for a [`LightRig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigConfig {
    /// Handling of clock regressions.
    pub delta_policy: DeltaPolicy,
}

/// Drives one set of outputs through sequences from a shared catalog.
///
/// The rig owns its output and keeps it in sync with the player: the first
/// frame is rendered on construction and the output is only written again
/// when the channel states change.
///
/// # Type Parameters
/// * `'c` - Lifetime of the catalog borrow
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `O` - Output implementation type
/// * `T` - Time source implementation type
/// * `C` - Number of output channels
/// * `F` - Maximum frames per sequence
/// * `S` - Maximum sequences in the catalog
pub struct LightRig<
    'c,
    't,
    I: TimeInstant,
    O: ChannelOutput<C>,
    T: TimeSource<I>,
    const C: usize,
    const F: usize,
    const S: usize,
> {
    output: O,
    time_source: &'t T,
    player: Player<'c, I::Duration, C, F, S>,
    last_service: I,
    rendered: ChannelBits<C>,
    config: RigConfig,
}

impl<'c, 't, I, O, T, const C: usize, const F: usize, const S: usize>
    LightRig<'c, 't, I, O, T, C, F, S>
where
    I: TimeInstant,
    O: ChannelOutput<C>,
    T: TimeSource<I>,
{
    /// Creates a rig playing the named sequence with the default config.
    ///
    /// # Errors
    /// * `NotFound` - No sequence has this name
    pub fn new(
        catalog: &'c Catalog<I::Duration, C, F, S>,
        output: O,
        time_source: &'t T,
        initial: &str,
    ) -> Result<Self, PlayerError> {
        Self::with_config(catalog, output, time_source, initial, RigConfig::default())
    }

    /// Creates a rig playing the named sequence.
    ///
    /// # Errors
    /// * `NotFound` - No sequence has this name
    pub fn with_config(
        catalog: &'c Catalog<I::Duration, C, F, S>,
        mut output: O,
        time_source: &'t T,
        initial: &str,
        config: RigConfig,
    ) -> Result<Self, PlayerError> {
        let player = Player::new(catalog, initial)?;
        let rendered = player.current_frame_bits();
        output.set_channels(&rendered);

        Ok(Self {
            output,
            time_source,
            player,
            last_service: time_source.now(),
            rendered,
            config,
        })
    }

    /// Handles an action by dispatching to the matching method.
    ///
    /// # Returns
    /// * `Ok(duration)` - Time until the next frame starts
    /// * `Err` - The action failed; playback is unchanged
    pub fn handle_action(&mut self, action: &RigAction) -> Result<I::Duration, PlayerError> {
        match action {
            RigAction::Select(name) => self.select(name),
            RigAction::Restart => Ok(self.restart()),
        }
    }

    /// Switches to the named sequence and renders its first frame.
    ///
    /// # Errors
    /// * `NotFound` - No sequence has this name; output and playback are unchanged
    pub fn select(&mut self, name: &str) -> Result<I::Duration, PlayerError> {
        self.player.select(name)?;
        self.last_service = self.time_source.now();
        self.render();
        Ok(self.player.remaining_in_frame())
    }

    /// Restarts the active sequence and renders its first frame.
    pub fn restart(&mut self) -> I::Duration {
        self.player.restart();
        self.last_service = self.time_source.now();
        self.render();
        self.player.remaining_in_frame()
    }

    /// Advances playback to the current time and updates the output if needed.
    ///
    /// # Returns
    /// * `Ok(duration)` - Time until the next frame starts; sleep this long
    /// * `Err(InvalidDelta)` - The clock went backwards under [`DeltaPolicy::Reject`]
    pub fn service(&mut self) -> Result<I::Duration, PlayerError> {
        let now = self.time_source.now();

        match now.checked_duration_since(self.last_service) {
            Some(delta) => {
                // Only whole milliseconds are consumed; the remainder stays
                // on the clock for the next service call.
                let consumed = I::Duration::from_millis(delta.as_millis());
                self.player.tick(consumed);
                self.last_service = self.last_service.checked_add(consumed).unwrap_or(now);
            }
            None => match self.config.delta_policy {
                DeltaPolicy::Clamp => {
                    warn!("clock moved backwards, holding frame {}", self.player.frame_index());
                    self.last_service = now;
                }
                DeltaPolicy::Reject => {
                    error!(
                        "clock moved backwards, rejecting at frame {}",
                        self.player.frame_index()
                    );
                    return Err(PlayerError::InvalidDelta);
                }
            },
        }

        self.render();
        Ok(self.player.remaining_in_frame())
    }

    fn render(&mut self) {
        let bits = self.player.current_frame_bits();
        if bits != self.rendered {
            trace!("frame {} of {}", self.player.frame_index(), self.player.active_name());
            self.output.set_channels(&bits);
            self.rendered = bits;
        }
    }

    /// Returns the channel states last written to the output.
    pub fn current_frame_bits(&self) -> ChannelBits<C> {
        self.rendered
    }

    /// Returns the name of the active sequence.
    pub fn active_name(&self) -> &'c str {
        self.player.active_name()
    }

    /// Returns the underlying player.
    pub fn player(&self) -> &Player<'c, I::Duration, C, F, S> {
        &self.player
    }

    /// Returns the output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Returns the rig configuration.
    pub fn config(&self) -> RigConfig {
        self.config
    }
}
