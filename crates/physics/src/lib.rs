//! Physics system using Rapier3D for Skyward.

pub mod collision;
pub mod physics_world;
pub mod vehicle;

pub use collision::*;
pub use physics_world::*;
pub use vehicle::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
