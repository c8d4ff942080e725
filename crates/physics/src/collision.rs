//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different body types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground plane)
    Environment = 1 << 0,
    /// The player vehicle
    Vehicle = 1 << 1,
}

impl CollisionGroup {
    /// Interaction groups for static environment geometry.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Environment as u32),
            Group::ALL,
        )
    }

    /// Interaction groups for the vehicle: it only touches the environment.
    pub fn vehicle() -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_retain(Self::Vehicle as u32),
            Group::from_bits_retain(Self::Environment as u32),
        )
    }
}
