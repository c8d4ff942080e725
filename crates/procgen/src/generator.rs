//! Distance-triggered body spawning around the ship.

use crate::bodies::{BodyFactory, BodyHandle, SpawnedBody};
use crate::error::{check_distance, SpawnError};
use crate::sampler::{random_rotation, SamplerParams, SpatialSampler};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Spawn timing and placement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Ship displacement between spawn attempts.
    #[serde(default = "default_spawn_interval_distance")]
    pub spawn_interval_distance: f32,
    /// Closest a body can spawn to the ship.
    #[serde(default = "default_min_spawn_radius")]
    pub min_spawn_radius: f32,
    /// Furthest a body can spawn from the ship.
    #[serde(default = "default_max_spawn_radius")]
    pub max_spawn_radius: f32,
    /// Minimum distance between any two bodies.
    #[serde(default = "default_min_buffer_distance")]
    pub min_buffer_distance: f32,
    #[serde(default = "default_max_spawn_attempts")]
    pub max_spawn_attempts: u32,
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    /// Names of the spawnable body kinds. Must not be empty.
    #[serde(default = "default_body_kinds")]
    pub body_kinds: Vec<String>,
}

fn default_spawn_interval_distance() -> f32 {
    1500.0
}
fn default_min_spawn_radius() -> f32 {
    2000.0
}
fn default_max_spawn_radius() -> f32 {
    7000.0
}
fn default_min_buffer_distance() -> f32 {
    3000.0
}
fn default_max_spawn_attempts() -> u32 {
    10
}
fn default_min_scale() -> f32 {
    50.0
}
fn default_max_scale() -> f32 {
    150.0
}
fn default_body_kinds() -> Vec<String> {
    vec!["rocky".into(), "gas_giant".into(), "ice".into()]
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_interval_distance: default_spawn_interval_distance(),
            min_spawn_radius: default_min_spawn_radius(),
            max_spawn_radius: default_max_spawn_radius(),
            min_buffer_distance: default_min_buffer_distance(),
            max_spawn_attempts: default_max_spawn_attempts(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            body_kinds: default_body_kinds(),
        }
    }
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), SpawnError> {
        if self.body_kinds.is_empty() {
            return Err(SpawnError::NoBodyKinds);
        }
        check_distance("spawn_interval_distance", self.spawn_interval_distance)?;
        check_distance("min_spawn_radius", self.min_spawn_radius)?;
        check_distance("max_spawn_radius", self.max_spawn_radius)?;
        check_distance("min_buffer_distance", self.min_buffer_distance)?;
        if self.min_spawn_radius > self.max_spawn_radius {
            return Err(SpawnError::InvalidRadius {
                min: self.min_spawn_radius,
                max: self.max_spawn_radius,
            });
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite()) {
            return Err(SpawnError::InvalidScale {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.max_spawn_attempts == 0 {
            return Err(SpawnError::NoAttempts);
        }
        Ok(())
    }

    pub fn sampler_params(&self) -> SamplerParams {
        SamplerParams {
            min_radius: self.min_spawn_radius,
            max_radius: self.max_spawn_radius,
            min_buffer_distance: self.min_buffer_distance,
            max_attempts: self.max_spawn_attempts,
        }
    }
}

/// Places new bodies as the ship travels and owns the body registry.
pub struct WorldGenerator {
    config: SpawnerConfig,
    sampler: SpatialSampler,
    last_spawn_position: Vec3,
    bodies: Vec<SpawnedBody>,
}

impl WorldGenerator {
    /// Fails when the configuration cannot produce bodies, so a bad setup is
    /// caught at startup rather than on the first spawn attempt.
    pub fn new(config: SpawnerConfig, ship_position: Vec3) -> Result<Self, SpawnError> {
        config.validate()?;
        Ok(Self {
            sampler: SpatialSampler::new(config.sampler_params())?,
            config,
            last_spawn_position: ship_position,
            bodies: Vec::new(),
        })
    }

    pub fn last_spawn_position(&self) -> Vec3 {
        self.last_spawn_position
    }

    pub fn bodies(&self) -> &[SpawnedBody] {
        &self.bodies
    }

    /// Registry access for the lifecycle pass.
    pub fn bodies_mut(&mut self) -> &mut Vec<SpawnedBody> {
        &mut self.bodies
    }

    /// Positions of registered bodies whose scene objects still exist.
    fn occupied_points<F: BodyFactory>(&self, factory: &F) -> Vec<Vec3> {
        self.bodies
            .iter()
            .filter(|b| factory.is_alive(b.handle))
            .map(|b| b.position)
            .collect()
    }

    /// Run one generation tick. Attempts a spawn once the ship has moved
    /// `spawn_interval_distance` from the last attempt; the reference point
    /// moves to the ship whether or not a position was found.
    pub fn tick<F, R>(
        &mut self,
        ship_position: Vec3,
        ship_forward: Vec3,
        factory: &mut F,
        rng: &mut R,
    ) -> Option<BodyHandle>
    where
        F: BodyFactory,
        R: Rng + ?Sized,
    {
        if ship_position.distance(self.last_spawn_position) < self.config.spawn_interval_distance {
            return None;
        }
        self.last_spawn_position = ship_position;

        let occupied = self.occupied_points(factory);
        let Some(position) = self.sampler.sample(rng, ship_position, ship_forward, &occupied) else {
            log::debug!(
                "No clear spawn position near {ship_position} after {} attempts",
                self.config.max_spawn_attempts
            );
            return None;
        };

        let kind = rng.gen_range(0..self.config.body_kinds.len());
        let rotation = random_rotation(rng);
        let scale = rng.gen_range(self.config.min_scale..=self.config.max_scale);
        let handle = factory.spawn(kind, position, rotation, scale);

        log::debug!(
            "Spawned {} at {position} (scale {scale:.1}, {} registered)",
            self.config.body_kinds[kind],
            self.bodies.len() + 1
        );
        self.bodies.push(SpawnedBody {
            handle,
            kind,
            position,
            rotation,
            scale,
            active: true,
        });
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::SceneBodies;
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_kind_list_is_rejected_up_front() {
        let config = SpawnerConfig {
            body_kinds: Vec::new(),
            ..Default::default()
        };
        assert_eq!(
            WorldGenerator::new(config, Vec3::ZERO).err(),
            Some(SpawnError::NoBodyKinds)
        );
    }

    #[test]
    fn inverted_radius_is_rejected() {
        let config = SpawnerConfig {
            min_spawn_radius: 8000.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpawnError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn short_hop_changes_nothing() {
        let mut gen = WorldGenerator::new(SpawnerConfig::default(), Vec3::ZERO).unwrap();
        let mut bodies = SceneBodies::new();
        let mut rng = StdRng::seed_from_u64(5);

        for step in 1..=14 {
            let ship = Vec3::new(0.0, 0.0, -100.0 * step as f32);
            assert_eq!(gen.tick(ship, -Vec3::Z, &mut bodies, &mut rng), None);
            assert_eq!(gen.last_spawn_position(), Vec3::ZERO);
        }
        assert!(gen.bodies().is_empty());
        assert!(bodies.is_empty());
    }

    #[test]
    fn reference_moves_even_without_a_spawn() {
        let config = SpawnerConfig {
            // Buffer larger than the whole shell: nothing can ever be placed
            // once one body exists.
            min_buffer_distance: 50_000.0,
            ..Default::default()
        };
        let mut gen = WorldGenerator::new(config, Vec3::ZERO).unwrap();
        let mut bodies = SceneBodies::new();
        let mut rng = StdRng::seed_from_u64(9);

        let first = Vec3::new(0.0, 0.0, -1500.0);
        assert!(gen.tick(first, -Vec3::Z, &mut bodies, &mut rng).is_some());
        assert_eq!(gen.last_spawn_position(), first);

        let second = Vec3::new(0.0, 0.0, -3000.0);
        assert_eq!(gen.tick(second, -Vec3::Z, &mut bodies, &mut rng), None);
        assert_eq!(gen.last_spawn_position(), second);
        assert_eq!(gen.bodies().len(), 1);
    }

    #[test]
    fn spawned_bodies_respect_config_ranges() {
        let mut gen = WorldGenerator::new(SpawnerConfig::default(), Vec3::ZERO).unwrap();
        let mut bodies = SceneBodies::new();
        let mut rng = StdRng::seed_from_u64(21);

        for step in 1..=40 {
            let ship = Vec3::new(0.0, 0.0, -1500.0 * step as f32);
            gen.tick(ship, -Vec3::Z, &mut bodies, &mut rng);
        }
        assert!(!gen.bodies().is_empty());
        for body in gen.bodies() {
            assert!(body.scale >= 50.0 && body.scale <= 150.0);
            assert!(body.kind < 3);
            assert!(body.rotation.is_normalized());
            assert!(body.active);
            assert_eq!(bodies.kind(body.handle), Some(body.kind));
            assert_eq!(bodies.position(body.handle), Some(body.position));
        }
    }

    #[test]
    fn bodies_never_spawn_inside_each_others_buffer() {
        for seed in 0..25 {
            let mut gen = WorldGenerator::new(SpawnerConfig::default(), Vec3::ZERO).unwrap();
            let mut bodies = SceneBodies::new();
            let mut rng = StdRng::seed_from_u64(seed);

            // Wander around so the shell overlaps earlier spawns.
            let mut ship = Vec3::ZERO;
            for step in 0..60 {
                let heading = Quat::from_rotation_y(step as f32 * 0.7) * -Vec3::Z;
                ship += heading * 1600.0;
                gen.tick(ship, heading, &mut bodies, &mut rng);
            }

            let placed = gen.bodies();
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(
                        a.position.distance(b.position) >= 3000.0,
                        "seed {seed}: {} and {} too close",
                        a.position,
                        b.position
                    );
                }
            }
        }
    }

    #[test]
    fn destroyed_bodies_stop_blocking_placement() {
        let config = SpawnerConfig {
            min_buffer_distance: 50_000.0,
            ..Default::default()
        };
        let mut gen = WorldGenerator::new(config, Vec3::ZERO).unwrap();
        let mut bodies = SceneBodies::new();
        let mut rng = StdRng::seed_from_u64(2);

        let first = gen
            .tick(Vec3::new(0.0, 0.0, -1500.0), -Vec3::Z, &mut bodies, &mut rng)
            .expect("empty space accepts the first body");
        bodies.destroy(first);

        assert!(gen
            .tick(Vec3::new(0.0, 0.0, -3000.0), -Vec3::Z, &mut bodies, &mut rng)
            .is_some());
    }
}
