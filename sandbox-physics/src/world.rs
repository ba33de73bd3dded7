// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Simulation world
//!
//! The [`World`] owns every body, the standing force generators and the
//! queue of pending impulses. [`World::step`] advances the simulation in a
//! fixed order:
//!
//! 1. Continuous forces on every movable body
//! 2. Queued impulses, each applied once and dropped
//! 3. Ground and body-to-body collision, then the collision impulses
//! 4. Linear and rotational integration
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use sandbox_physics::{Body, World, WorldConfig};
//!
//! let mut world = World::with_standard_forces(WorldConfig::default()).unwrap();
//! let ball = world.add_body(
//!     Body::builder()
//!         .size(DVec3::splat(0.5))
//!         .position(DVec3::new(0.0, 3.0, 0.0))
//!         .build()
//!         .unwrap(),
//! );
//!
//! for _ in 0..600 {
//!     world.step(1.0 / 120.0);
//! }
//!
//! let ball = world.body(ball).unwrap();
//! assert!((ball.position().y - 0.25).abs() < 1e-9);
//! ```

use std::fmt;

use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{trace, warn};

use crate::body::{Body, BodyHandle};
use crate::collision;
use crate::config::WorldConfig;
use crate::error::ConfigError;
use crate::forces::{Drag, ForceContext, ForceGenerator, Friction, Gravity, Wind};
use crate::impulses::{Impulse, ImpulseContext};
use crate::integration::{
    total_kinetic_energy, total_momentum, validate_timestep, Integrator, SemiImplicitEuler,
};

/// Counters describing what happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Bodies whose linear state was advanced
    pub bodies_integrated: usize,
    /// Bodies resolved against the ground plane
    pub ground_contacts: usize,
    /// Colliding body pairs
    pub body_contacts: usize,
    /// Queued impulses consumed this step
    pub impulses_applied: usize,
    /// Body velocity changes delivered by queued and collision impulses
    pub bodies_impulsed: usize,
}

/// Owner of all simulation state and the single entry point for stepping
pub struct World {
    bodies: Vec<Body>,
    force_generators: Vec<Box<dyn ForceGenerator>>,
    impulses: Vec<Box<dyn Impulse>>,
    integrator: SemiImplicitEuler,
    config: WorldConfig,
    rng: StdRng,
}

impl World {
    /// Create an empty world without any force generators
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(World {
            bodies: Vec::new(),
            force_generators: Vec::new(),
            impulses: Vec::new(),
            integrator: SemiImplicitEuler,
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Create a world with gravity, drag, wind and ground friction taken from `config`
    ///
    /// Friction is only registered when the world has a floor, and is
    /// registered last so its stiction check sees every other force.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn with_standard_forces(config: WorldConfig) -> Result<Self, ConfigError> {
        let mut world = World::new(config)?;
        let config = world.config.clone();

        world.add_force_generator(Gravity::new(config.gravity));
        world.add_force_generator(Drag::new(config.air_density));
        world.add_force_generator(Wind::new(config.air_density, config.wind));
        if config.has_floor {
            world.add_force_generator(Friction::new(
                config.floor_static_friction,
                config.floor_kinetic_friction,
            ));
        }
        Ok(world)
    }

    /// Add a body and return its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle::new(self.bodies.len() - 1)
    }

    /// Register a standing force generator
    pub fn add_force_generator<G: ForceGenerator + 'static>(&mut self, generator: G) {
        self.force_generators.push(Box::new(generator));
    }

    /// Queue an impulse for the next step
    pub fn add_impulse<I: Impulse + 'static>(&mut self, impulse: I) {
        self.impulses.push(Box::new(impulse));
    }

    /// Get a body by handle
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    /// Get a body by handle for caller-driven changes
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.index())
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Handles of all bodies in insertion order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.bodies.len()).map(BodyHandle::new)
    }

    /// Number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of impulses waiting for the next step
    pub fn pending_impulses(&self) -> usize {
        self.impulses.len()
    }

    /// Number of registered force generators
    pub fn force_generator_count(&self) -> usize {
        self.force_generators.len()
    }

    /// Environment configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Total kinetic energy of all movable bodies
    pub fn kinetic_energy(&self) -> f64 {
        total_kinetic_energy(&self.bodies)
    }

    /// Total linear momentum of all movable bodies
    pub fn momentum(&self) -> DVec3 {
        total_momentum(&self.bodies)
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// An invalid `dt` leaves the world untouched, including the impulse
    /// queue, and returns empty stats.
    pub fn step(&mut self, dt: f64) -> StepStats {
        if let Err(err) = validate_timestep(dt) {
            warn!("Skipping step: {}", err);
            return StepStats::default();
        }

        let force_ctx = ForceContext::new(dt, self.config.has_floor);
        self.apply_forces(&force_ctx);

        let mut impulse_ctx =
            ImpulseContext::new(dt, self.config.restitution_ceiling, &mut self.rng);

        let mut impulses_applied = 0;
        let mut bodies_impulsed = 0;
        for impulse in self.impulses.drain(..) {
            trace!("Applying {} impulse", impulse.name());
            bodies_impulsed += impulse.apply(&mut self.bodies, &mut impulse_ctx);
            impulses_applied += 1;
        }

        let report = collision::detect_and_resolve(
            &mut self.bodies,
            self.config.has_floor,
            self.config.restitution_ceiling,
        );
        let body_contacts = report.body_contacts();
        for impulse in report.impulses {
            bodies_impulsed += Box::new(impulse).apply(&mut self.bodies, &mut impulse_ctx);
        }

        let bodies_integrated = self.integrator.integrate(&mut self.bodies, dt);

        let stats = StepStats {
            bodies_integrated,
            ground_contacts: report.ground_contacts,
            body_contacts,
            impulses_applied,
            bodies_impulsed,
        };
        trace!(
            dt,
            bodies_integrated = stats.bodies_integrated,
            ground_contacts = stats.ground_contacts,
            body_contacts = stats.body_contacts,
            impulses_applied = stats.impulses_applied,
            bodies_impulsed = stats.bodies_impulsed,
            "Step complete"
        );
        stats
    }

    #[cfg(not(feature = "parallel"))]
    fn apply_forces(&mut self, ctx: &ForceContext) {
        let generators = &self.force_generators;
        for body in self.bodies.iter_mut().filter(|body| !body.is_immovable()) {
            for generator in generators {
                generator.apply(body, ctx);
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn apply_forces(&mut self, ctx: &ForceContext) {
        let generators = &self.force_generators;
        self.bodies
            .par_iter_mut()
            .filter(|body| !body.is_immovable())
            .for_each(|body| {
                for generator in generators {
                    generator.apply(body, ctx);
                }
            });
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let generators: Vec<&str> = self.force_generators.iter().map(|g| g.name()).collect();
        f.debug_struct("World")
            .field("bodies", &self.bodies.len())
            .field("force_generators", &generators)
            .field("pending_impulses", &self.impulses.len())
            .field("integrator", &self.integrator.name())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impulses::{CursorImpulse, RadialImpulse};

    fn cube(position: DVec3) -> Body {
        Body::builder()
            .size(DVec3::ONE)
            .position(position)
            .build()
            .unwrap()
    }

    #[test]
    fn test_handles_follow_insertion_order() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        let a = world.add_body(cube(DVec3::ZERO));
        let b = world.add_body(cube(DVec3::X * 3.0));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(world.handles().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(world.body(b).unwrap().position().x, 3.0);
        assert!(world.body(BodyHandle::new(7)).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            restitution_ceiling: -0.1,
            ..WorldConfig::default()
        };
        assert!(World::new(config.clone()).is_err());
        assert!(World::with_standard_forces(config).is_err());
    }

    #[test]
    fn test_standard_forces_registered() {
        let world = World::with_standard_forces(WorldConfig::default()).unwrap();
        assert_eq!(world.force_generator_count(), 4);

        let world = World::with_standard_forces(WorldConfig::vacuum(-9.8)).unwrap();
        assert_eq!(world.force_generator_count(), 3);
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mut world = World::with_standard_forces(WorldConfig::default()).unwrap();
        let handle = world.add_body(cube(DVec3::new(0.0, 5.0, 0.0)));
        world.add_impulse(RadialImpulse::explosion(DVec3::ZERO, 100.0, 5.0));

        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            assert_eq!(world.step(dt), StepStats::default());
        }
        assert_eq!(world.body(handle).unwrap().position().y, 5.0);
        assert_eq!(world.pending_impulses(), 1);
    }

    #[test]
    fn test_impulses_consumed_once() {
        let mut world = World::new(WorldConfig::vacuum(0.0)).unwrap();
        let handle = world.add_body(cube(DVec3::new(0.0, 5.0, 0.0)));
        world.add_impulse(CursorImpulse::new(handle, DVec3::new(0.0, 5.0, 0.0), DVec3::X, 3.0));
        assert_eq!(world.pending_impulses(), 1);

        let stats = world.step(0.01);
        assert_eq!(stats.impulses_applied, 1);
        assert_eq!(stats.bodies_impulsed, 1);
        assert_eq!(world.pending_impulses(), 0);
        assert_eq!(world.body(handle).unwrap().velocity().x, 8.0);

        let stats = world.step(0.01);
        assert_eq!(stats.impulses_applied, 0);
        assert_eq!(stats.bodies_impulsed, 0);
        assert_eq!(world.body(handle).unwrap().velocity().x, 8.0);
    }

    #[test]
    fn test_step_reports_contacts() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        world.add_body(cube(DVec3::new(0.0, 0.4, 0.0)));
        world.add_body(cube(DVec3::new(5.0, 2.0, 0.0)));
        world.add_body(cube(DVec3::new(5.5, 2.0, 0.0)));

        let stats = world.step(0.008);
        assert_eq!(stats.ground_contacts, 1);
        assert_eq!(stats.body_contacts, 1);
        assert_eq!(stats.bodies_integrated, 3);
    }

    #[test]
    fn test_static_bodies_never_move() {
        let mut world = World::with_standard_forces(WorldConfig::default()).unwrap();
        let wall = world.add_body(
            Body::builder()
                .immovable()
                .size(DVec3::new(1.0, 4.0, 4.0))
                .position(DVec3::new(2.0, 2.0, 0.0))
                .build()
                .unwrap(),
        );
        let mover = world.add_body(
            Body::builder()
                .size(DVec3::ONE)
                .position(DVec3::new(0.0, 0.5, 0.0))
                .velocity(DVec3::new(20.0, 0.0, 0.0))
                .build()
                .unwrap(),
        );
        // Blast the mover straight into the wall
        world.add_impulse(RadialImpulse::explosion(DVec3::new(-2.0, 0.5, 0.0), 40.0, 10.0));

        for _ in 0..240 {
            world.step(1.0 / 120.0);
        }
        let wall = world.body(wall).unwrap();
        assert_eq!(wall.position(), DVec3::new(2.0, 2.0, 0.0));
        assert_eq!(wall.velocity(), DVec3::ZERO);
        assert!(world.body(mover).unwrap().position().x < 1.5);
    }

    #[test]
    fn test_separating_contacts_deliver_nothing() {
        let mut world = World::new(WorldConfig::vacuum(0.0)).unwrap();
        let a = world.add_body(cube(DVec3::new(0.0, 5.0, 0.0)));
        world.add_body(cube(DVec3::new(0.5, 5.0, 0.0)));
        world.body_mut(a).unwrap().set_velocity(DVec3::new(-1.0, 0.0, 0.0));

        let stats = world.step(0.01);
        assert_eq!(stats.body_contacts, 1);
        assert_eq!(stats.bodies_impulsed, 0);
    }

    #[test]
    fn test_friction_registered_last() {
        let world = World::with_standard_forces(WorldConfig::default()).unwrap();
        let debug = format!("{:?}", world);
        assert!(debug.contains(r#"["gravity", "drag", "wind", "friction"]"#));
    }

    #[test]
    fn test_debug_lists_generators() {
        let world = World::with_standard_forces(WorldConfig::default()).unwrap();
        let debug = format!("{:?}", world);
        assert!(debug.contains("gravity"));
        assert!(debug.contains("friction"));
    }
}
