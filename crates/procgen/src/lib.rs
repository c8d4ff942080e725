//! Procedural placement of bodies around a travelling ship: rejection-sampled
//! spawning and distance-driven activation and cleanup.

pub mod bodies;
pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod sampler;

pub use bodies::*;
pub use error::*;
pub use generator::*;
pub use lifecycle::*;
pub use sampler::*;
