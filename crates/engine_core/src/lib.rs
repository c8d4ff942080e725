//! Core engine types and utilities for Skyward.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial helpers
//! - Frame and fixed-step time management

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
