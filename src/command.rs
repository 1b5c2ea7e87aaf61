//! Command-based control for rigs.

use crate::types::{CatalogError, NAME_CAPACITY};
use heapless::String;

/// Actions for controlling rigs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigAction {
    /// Switch to the named sequence.
    Select(String<NAME_CAPACITY>),
    /// Restart the active sequence.
    Restart,
}

impl RigAction {
    /// Creates a `Select` action.
    ///
    /// # Errors
    /// * `NameTooLong` - Name exceeds [`NAME_CAPACITY`]
    pub fn select(name: &str) -> Result<Self, CatalogError> {
        let mut owned = String::new();
        owned
            .push_str(name)
            .map_err(|_| CatalogError::NameTooLong)?;
        Ok(RigAction::Select(owned))
    }
}

/// Command targeting a specific rig.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RigCommand<Id> {
    pub rig_id: Id,
    pub action: RigAction,
}

impl<Id> RigCommand<Id> {
    /// Creates command.
    pub fn new(rig_id: Id, action: RigAction) -> Self {
        Self { rig_id, action }
    }
}
