use crate::catalog::Catalog;
use crate::command::RigCommand;
use crate::player::PlayerError;
use crate::rig::{ChannelOutput, LightRig, RigConfig};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::ChannelBits;

/// An identifier for a rig within a [`RigBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigId(pub usize);

impl From<usize> for RigId {
    fn from(id: usize) -> Self {
        RigId(id)
    }
}

impl From<RigId> for usize {
    fn from(id: RigId) -> Self {
        id.0
    }
}

/// Errors that can occur during bank operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankError {
    /// The specified rig ID does not exist in the bank.
    InvalidRigId(RigId),

    /// Attempted to add a rig with an ID that already exists.
    DuplicateRigId(RigId),

    /// The rig ID exceeds the bank's capacity.
    RigIdOutOfBounds { id: RigId, capacity: usize },

    /// A player operation failed.
    Player(PlayerError),
}

impl core::fmt::Display for BankError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BankError::InvalidRigId(id) => {
                write!(f, "rig ID {} does not exist in bank", id.0)
            }
            BankError::DuplicateRigId(id) => {
                write!(f, "rig ID {} already exists in bank", id.0)
            }
            BankError::RigIdOutOfBounds { id, capacity } => {
                write!(f, "rig ID {} exceeds bank capacity {}", id.0, capacity)
            }
            BankError::Player(err) => write!(f, "player error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BankError {}

impl From<PlayerError> for BankError {
    fn from(err: PlayerError) -> Self {
        BankError::Player(err)
    }
}

/// Several rigs sharing one catalog and one time source.
///
/// Each rig keeps its own playback position, so e.g. the front and rear
/// lamps of a vehicle can run different sequences off the same catalog.
///
/// # Type Parameters
/// * `MAX_RIGS` - Maximum number of rigs this bank can hold
pub struct RigBank<
    'c,
    't,
    I: TimeInstant,
    O: ChannelOutput<C>,
    T: TimeSource<I>,
    const C: usize,
    const F: usize,
    const S: usize,
    const MAX_RIGS: usize,
> {
    rigs: [Option<LightRig<'c, 't, I, O, T, C, F, S>>; MAX_RIGS],
    catalog: &'c Catalog<I::Duration, C, F, S>,
    time_source: &'t T,
    config: RigConfig,
}

impl<'c, 't, I, O, T, const C: usize, const F: usize, const S: usize, const MAX_RIGS: usize>
    RigBank<'c, 't, I, O, T, C, F, S, MAX_RIGS>
where
    I: TimeInstant,
    O: ChannelOutput<C>,
    T: TimeSource<I>,
{
    /// Creates an empty bank whose rigs use the default config.
    pub fn new(catalog: &'c Catalog<I::Duration, C, F, S>, time_source: &'t T) -> Self {
        Self::with_config(catalog, time_source, RigConfig::default())
    }

    /// Creates an empty bank whose rigs use `config`.
    pub fn with_config(
        catalog: &'c Catalog<I::Duration, C, F, S>,
        time_source: &'t T,
        config: RigConfig,
    ) -> Self {
        Self {
            rigs: core::array::from_fn(|_| None),
            catalog,
            time_source,
            config,
        }
    }

    /// Adds a rig playing `initial` on `output`.
    ///
    /// # Errors
    /// * `RigIdOutOfBounds` - The ID exceeds the bank's capacity
    /// * `DuplicateRigId` - A rig with this ID already exists
    /// * `Player(NotFound)` - No sequence has the name `initial`
    pub fn add_rig(&mut self, id: RigId, output: O, initial: &str) -> Result<(), BankError> {
        let idx = id.0;

        if idx >= MAX_RIGS {
            return Err(BankError::RigIdOutOfBounds {
                id,
                capacity: MAX_RIGS,
            });
        }

        if self.rigs[idx].is_some() {
            return Err(BankError::DuplicateRigId(id));
        }

        let rig = LightRig::with_config(
            self.catalog,
            output,
            self.time_source,
            initial,
            self.config,
        )?;
        self.rigs[idx] = Some(rig);
        Ok(())
    }

    /// Routes a command to its rig.
    ///
    /// # Returns
    /// * `Ok(duration)` - Time until that rig's next frame
    /// * `Err` - Unknown rig or the action failed
    pub fn handle_command(&mut self, command: &RigCommand<RigId>) -> Result<I::Duration, BankError> {
        let rig = self.rig_mut(command.rig_id)?;
        Ok(rig.handle_action(&command.action)?)
    }

    /// Services every rig and returns the time until the earliest next frame.
    ///
    /// # Returns
    /// * `Ok(Some(duration))` - Sleep this long before servicing again
    /// * `Ok(None)` - The bank holds no rigs
    /// * `Err` - A rig rejected a clock regression
    pub fn service_all(&mut self) -> Result<Option<I::Duration>, BankError> {
        let mut min_duration: Option<I::Duration> = None;

        for rig in self.rigs.iter_mut().flatten() {
            let duration = rig.service()?;
            min_duration = match min_duration {
                Some(current) if current.as_millis() <= duration.as_millis() => Some(current),
                _ => Some(duration),
            };
        }

        Ok(min_duration)
    }

    /// Returns the channel states shown by a rig.
    ///
    /// # Errors
    /// Returns `InvalidRigId` if the rig does not exist in the bank.
    pub fn current_bits(&self, id: RigId) -> Result<ChannelBits<C>, BankError> {
        Ok(self.rig(id)?.current_frame_bits())
    }

    /// Returns the name of the sequence a rig is playing.
    ///
    /// # Errors
    /// Returns `InvalidRigId` if the rig does not exist in the bank.
    pub fn active_name(&self, id: RigId) -> Result<&'c str, BankError> {
        Ok(self.rig(id)?.active_name())
    }

    /// Returns the rig with the given ID.
    ///
    /// # Errors
    /// Returns `InvalidRigId` if the rig does not exist in the bank.
    pub fn rig(&self, id: RigId) -> Result<&LightRig<'c, 't, I, O, T, C, F, S>, BankError> {
        self.rigs
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(BankError::InvalidRigId(id))
    }

    fn rig_mut(&mut self, id: RigId) -> Result<&mut LightRig<'c, 't, I, O, T, C, F, S>, BankError> {
        self.rigs
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(BankError::InvalidRigId(id))
    }

    /// Returns the number of rigs currently in the bank.
    pub fn len(&self) -> usize {
        self.rigs.iter().filter(|r| r.is_some()).count()
    }

    /// Returns true if the bank contains no rigs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the bank contains a rig with the given ID.
    pub fn contains(&self, id: RigId) -> bool {
        self.rig(id).is_ok()
    }
}
