//! Distance-based activation and cleanup of spawned bodies.

use crate::bodies::{BodyFactory, SpawnedBody};
use crate::error::{check_distance, SpawnError};
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Bodies closer than this are shown and simulated.
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f32,
    /// Bodies further than this are destroyed. Must exceed the activation distance.
    #[serde(default = "default_cleanup_distance")]
    pub cleanup_distance: f32,
}

fn default_activation_distance() -> f32 {
    10_000.0
}
fn default_cleanup_distance() -> f32 {
    20_000.0
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
            cleanup_distance: default_cleanup_distance(),
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> Result<(), SpawnError> {
        check_distance("activation_distance", self.activation_distance)?;
        check_distance("cleanup_distance", self.cleanup_distance)?;
        if self.cleanup_distance <= self.activation_distance {
            return Err(SpawnError::InvalidLifecycle {
                activation: self.activation_distance,
                cleanup: self.cleanup_distance,
            });
        }
        Ok(())
    }
}

/// Counts from one lifecycle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    pub active: usize,
    pub inactive: usize,
    pub evicted: usize,
    /// Registry entries whose scene object was already gone. They are
    /// dropped from the registry.
    pub missing: usize,
}

pub struct LifecycleManager {
    config: LifecycleConfig,
}

impl LifecycleManager {
    pub fn new(config: LifecycleConfig) -> Result<Self, SpawnError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Re-evaluate every registered body against the ship position.
    ///
    /// The active flag is recomputed from scratch each call. Bodies beyond the
    /// cleanup distance are destroyed and removed, and entries whose scene
    /// object is already gone are removed without being evaluated.
    /// Iteration runs from the back so a removal never skips or revisits an
    /// entry.
    pub fn update<F: BodyFactory>(
        &self,
        ship_position: Vec3,
        bodies: &mut Vec<SpawnedBody>,
        factory: &mut F,
    ) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        for i in (0..bodies.len()).rev() {
            let handle = bodies[i].handle;
            let Some(position) = factory.position(handle) else {
                bodies.swap_remove(i);
                report.missing += 1;
                continue;
            };

            let distance = ship_position.distance(position);
            let active = distance < self.config.activation_distance;
            bodies[i].active = active;
            factory.set_active(handle, active);

            if distance > self.config.cleanup_distance {
                factory.destroy(handle);
                bodies.swap_remove(i);
                report.evicted += 1;
                log::debug!("Evicted body at {position} ({distance:.0} from ship)");
            } else if active {
                report.active += 1;
            } else {
                report.inactive += 1;
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::SceneBodies;
    use glam::Quat;

    fn register(bodies: &mut SceneBodies, registry: &mut Vec<SpawnedBody>, position: Vec3) {
        let handle = bodies.spawn(0, position, Quat::IDENTITY, 100.0);
        registry.push(SpawnedBody {
            handle,
            kind: 0,
            position,
            rotation: Quat::IDENTITY,
            scale: 100.0,
            active: true,
        });
    }

    #[test]
    fn cleanup_must_exceed_activation() {
        let config = LifecycleConfig {
            activation_distance: 5000.0,
            cleanup_distance: 5000.0,
        };
        assert!(matches!(
            LifecycleManager::new(config),
            Err(SpawnError::InvalidLifecycle { .. })
        ));
    }

    #[test]
    fn mid_band_body_is_inactive_but_kept() {
        let manager = LifecycleManager::new(LifecycleConfig::default()).unwrap();
        let mut scene = SceneBodies::new();
        let mut registry = Vec::new();
        register(&mut scene, &mut registry, Vec3::new(15_000.0, 0.0, 0.0));

        let report = manager.update(Vec3::ZERO, &mut registry, &mut scene);

        assert_eq!(report.inactive, 1);
        assert_eq!(registry.len(), 1);
        assert!(!registry[0].active);
        assert_eq!(scene.is_visible(registry[0].handle), Some(false));
    }

    #[test]
    fn body_past_cleanup_is_removed_that_tick() {
        let manager = LifecycleManager::new(LifecycleConfig::default()).unwrap();
        let mut scene = SceneBodies::new();
        let mut registry = Vec::new();
        register(&mut scene, &mut registry, Vec3::new(15_000.0, 0.0, 0.0));
        let handle = registry[0].handle;

        manager.update(Vec3::ZERO, &mut registry, &mut scene);
        assert_eq!(registry.len(), 1);

        // Ship backs away until the body sits 20001 units behind.
        let report = manager.update(Vec3::new(-5_001.0, 0.0, 0.0), &mut registry, &mut scene);
        assert_eq!(report.evicted, 1);
        assert!(registry.is_empty());
        assert!(!scene.is_alive(handle));
    }

    #[test]
    fn exactly_at_cleanup_distance_survives() {
        let manager = LifecycleManager::new(LifecycleConfig::default()).unwrap();
        let mut scene = SceneBodies::new();
        let mut registry = Vec::new();
        register(&mut scene, &mut registry, Vec3::new(0.0, 20_000.0, 0.0));

        manager.update(Vec3::ZERO, &mut registry, &mut scene);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn active_flag_tracks_distance_every_tick() {
        let manager = LifecycleManager::new(LifecycleConfig::default()).unwrap();
        let mut scene = SceneBodies::new();
        let mut registry = Vec::new();
        register(&mut scene, &mut registry, Vec3::ZERO);

        for (ship_x, expected) in [(9_999.0, true), (10_000.0, false), (12_000.0, false), (500.0, true)] {
            manager.update(Vec3::new(ship_x, 0.0, 0.0), &mut registry, &mut scene);
            assert_eq!(registry[0].active, expected, "ship at {ship_x}");
            assert_eq!(scene.is_visible(registry[0].handle), Some(expected));
        }
    }

    #[test]
    fn eviction_is_independent_of_registry_order() {
        let manager = LifecycleManager::new(LifecycleConfig::default()).unwrap();
        let positions = [
            Vec3::new(25_000.0, 0.0, 0.0),
            Vec3::new(1_000.0, 0.0, 0.0),
            Vec3::new(0.0, 30_000.0, 0.0),
            Vec3::new(0.0, 0.0, 12_000.0),
            Vec3::new(0.0, 0.0, -21_000.0),
        ];

        for rotation in 0..positions.len() {
            let mut scene = SceneBodies::new();
            let mut registry = Vec::new();
            for k in 0..positions.len() {
                register(&mut scene, &mut registry, positions[(k + rotation) % positions.len()]);
            }

            let report = manager.update(Vec3::ZERO, &mut registry, &mut scene);
            assert_eq!(report.evicted, 3);
            assert_eq!(report.active, 1);
            assert_eq!(report.inactive, 1);

            let mut survivors: Vec<f32> = registry.iter().map(|b| b.position.length()).collect();
            survivors.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(survivors, vec![1_000.0, 12_000.0]);
            assert_eq!(scene.len(), 2);
        }
    }

    #[test]
    fn destroyed_handles_are_dropped_from_registry() {
        let manager = LifecycleManager::new(LifecycleConfig::default()).unwrap();
        let mut scene = SceneBodies::new();
        let mut registry = Vec::new();
        register(&mut scene, &mut registry, Vec3::new(50_000.0, 0.0, 0.0));
        register(&mut scene, &mut registry, Vec3::new(100.0, 0.0, 0.0));
        register(&mut scene, &mut registry, Vec3::new(0.0, 300.0, 0.0));
        let survivor = registry[1].handle;
        scene.destroy(registry[0].handle);
        scene.destroy(registry[2].handle);

        let report = manager.update(Vec3::ZERO, &mut registry, &mut scene);
        assert_eq!(report.missing, 2);
        assert_eq!(report.active, 1);
        assert_eq!(report.evicted, 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry[0].handle, survivor);

        // Nothing left to skip on the next pass.
        let report = manager.update(Vec3::ZERO, &mut registry, &mut scene);
        assert_eq!(report.missing, 0);
        assert_eq!(registry.len(), 1);
    }
}
