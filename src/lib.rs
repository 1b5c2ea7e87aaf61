#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Frame`**: On/off state for every channel plus a hold time
//! - **`Sequence`**: A named, non-empty, looping list of frames
//! - **`Catalog`**: Immutable set of uniquely named sequences, built once through a `CatalogBuilder`
//! - **`Player`**: Walks the frames of one selected sequence as time is ticked into it
//! - **`LightRig`**: Couples a player to a `ChannelOutput` and a `TimeSource`
//! - **`RigBank`**: Several rigs sharing one catalog
//! - **`RigAction`**: Commands that can be sent to control rigs
//!
//! Channels are strictly binary. Which physical pin a channel index drives is
//! up to the `ChannelOutput` implementation.

mod logging;

pub mod time;
pub mod types;
pub mod sequence;
pub mod catalog;
pub mod reference;
pub mod player;
pub mod rig;
pub mod command;
pub mod collection;

pub use catalog::{Catalog, CatalogBuilder, Names};
pub use collection::{BankError, RigBank, RigId};
pub use command::{RigAction, RigCommand};
pub use player::{Player, PlayerError};
pub use reference::{ReferenceCatalog, reference_builder, reference_catalog};
pub use rig::{ChannelOutput, DeltaPolicy, LightRig, RigConfig};
pub use sequence::Sequence;
pub use time::{Millis, TimeDuration, TimeInstant, TimeSource};
pub use types::{CatalogError, ChannelBits, Frame, NAME_CAPACITY};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_is_five_channels_wide() {
        let catalog = reference_catalog::<Millis>().unwrap();
        assert_eq!(catalog.channel_count(), 5);
    }
}
