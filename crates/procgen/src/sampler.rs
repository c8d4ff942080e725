//! Rejection sampling of spawn positions around a moving ship.
//!
//! Candidates are drawn in a spherical shell around the ship, biased toward
//! its direction of travel, and rejected when they land closer than the
//! minimum buffer distance to any occupied point.

use crate::error::{check_distance, SpawnError};
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Weight of the ship's forward axis in the blended spawn direction.
const FORWARD_BIAS: f32 = 0.5;

/// Shell and separation parameters for one sampling call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerParams {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_buffer_distance: f32,
    pub max_attempts: u32,
}

impl SamplerParams {
    /// Distances must be finite and non-negative with a non-empty radius
    /// range. Zero attempts is allowed and simply never samples.
    pub fn validate(&self) -> Result<(), SpawnError> {
        check_distance("min_radius", self.min_radius)?;
        check_distance("max_radius", self.max_radius)?;
        check_distance("min_buffer_distance", self.min_buffer_distance)?;
        if self.min_radius > self.max_radius {
            return Err(SpawnError::InvalidRadius {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        Ok(())
    }
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let phi: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniformly distributed orientation (Shoemake's method).
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let u1: f32 = rng.gen();
    let a = TAU * rng.gen::<f32>();
    let b = TAU * rng.gen::<f32>();
    let s1 = (1.0 - u1).sqrt();
    let s2 = u1.sqrt();
    Quat::from_xyzw(s1 * a.sin(), s1 * a.cos(), s2 * b.sin(), s2 * b.cos()).normalize()
}

/// Proposes spawn positions that keep clear of existing bodies.
#[derive(Debug, Clone)]
pub struct SpatialSampler {
    params: SamplerParams,
}

impl SpatialSampler {
    pub fn new(params: SamplerParams) -> Result<Self, SpawnError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Whether `candidate` keeps at least the buffer distance from every
    /// occupied point.
    pub fn is_clear(&self, candidate: Vec3, occupied: &[Vec3]) -> bool {
        occupied
            .iter()
            .all(|p| p.distance(candidate) >= self.params.min_buffer_distance)
    }

    /// Try up to `max_attempts` candidates and return the first clear one.
    ///
    /// `ship_forward` is expected to be unit length. Running out of attempts
    /// is a normal outcome and yields `None`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_position: Vec3,
        ship_forward: Vec3,
        occupied: &[Vec3],
    ) -> Option<Vec3> {
        for _ in 0..self.params.max_attempts {
            let random_dir = random_unit_vector(rng);
            let radius = rng.gen_range(self.params.min_radius..=self.params.max_radius);

            // Opposite vectors blend to nothing; that draw is simply spent.
            let direction = random_dir.lerp(ship_forward, FORWARD_BIAS).normalize_or_zero();
            if direction == Vec3::ZERO {
                continue;
            }

            let candidate = ship_position + direction * radius;
            if self.is_clear(candidate, occupied) {
                return Some(candidate);
            }
        }
        None
    }
}
