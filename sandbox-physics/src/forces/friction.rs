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
//! Ground friction
//!
//! Friction against the floor acts in the velocity domain on the horizontal
//! (XZ) components only:
//!
//! - **Static**: when the horizontal speed the body would reach this step
//!   (current velocity plus the horizontal acceleration other generators
//!   have accumulated) stays below `STICTION_FACTOR · μs`, the body stops
//!   outright and that acceleration is cancelled.
//! - **Kinetic**: otherwise the horizontal speed drops by
//!   `μk · KINETIC_FRICTION_SCALE · m · dt` along the direction of motion.
//!
//! Stiction only sees forces accumulated before it runs, so register
//! friction after every other generator (as
//! [`World::with_standard_forces`](crate::World::with_standard_forces) does).
//!
//! Each coefficient is the larger of the body's own value and the floor's.
//! This is the only place ground friction is applied; body-to-body contact
//! friction belongs to the collision response.

use glam::DVec3;

use super::{ForceContext, ForceGenerator};
use crate::body::Body;

/// Horizontal speed below `STICTION_FACTOR · μs` is treated as stuck
pub const STICTION_FACTOR: f64 = 3.0;

/// Scale applied to the kinetic deceleration
pub const KINETIC_FRICTION_SCALE: f64 = 6.0;

/// Horizontal components below this speed are snapped to zero after sliding
pub const SLIDE_SNAP_SPEED: f64 = 0.02;

/// Static/kinetic friction against the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Friction {
    static_friction: f64,
    kinetic_friction: f64,
}

impl Friction {
    /// Create ground friction with the floor's default coefficients
    ///
    /// # Panics
    ///
    /// Panics if either coefficient is negative or not finite.
    pub fn new(static_friction: f64, kinetic_friction: f64) -> Self {
        assert!(
            static_friction >= 0.0
                && static_friction.is_finite()
                && kinetic_friction >= 0.0
                && kinetic_friction.is_finite(),
            "Friction coefficients must be non-negative and finite"
        );
        Friction {
            static_friction,
            kinetic_friction,
        }
    }

    /// Floor static coefficient
    pub fn static_friction(&self) -> f64 {
        self.static_friction
    }

    /// Floor kinetic coefficient
    pub fn kinetic_friction(&self) -> f64 {
        self.kinetic_friction
    }
}

impl ForceGenerator for Friction {
    fn apply(&self, body: &mut Body, ctx: &ForceContext) {
        if body.is_immovable() || !ctx.is_grounded(body) {
            return;
        }

        let velocity = body.velocity();
        let horizontal = DVec3::new(velocity.x, 0.0, velocity.z);
        let speed = horizontal.length();

        let static_friction = body.material().static_friction.max(self.static_friction);
        let kinetic_friction = body.material().kinetic_friction.max(self.kinetic_friction);

        let pull = body.acceleration();
        let predicted = horizontal + DVec3::new(pull.x, 0.0, pull.z) * ctx.dt;
        if predicted.length() < static_friction * STICTION_FACTOR {
            body.set_velocity(DVec3::new(0.0, velocity.y, 0.0));
            body.acceleration = DVec3::new(0.0, pull.y, 0.0);
            return;
        }

        let decrement = kinetic_friction * KINETIC_FRICTION_SCALE * body.mass().value() * ctx.dt;
        if decrement >= speed {
            body.set_velocity(DVec3::new(0.0, velocity.y, 0.0));
            return;
        }

        let mut slowed = horizontal - horizontal / speed * decrement;
        if slowed.x.abs() < SLIDE_SNAP_SPEED {
            slowed.x = 0.0;
        }
        if slowed.z.abs() < SLIDE_SNAP_SPEED {
            slowed.z = 0.0;
        }
        body.set_velocity(DVec3::new(slowed.x, velocity.y, slowed.z));
    }

    fn name(&self) -> &str {
        "friction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sliding_body(velocity: DVec3, kinetic: f64) -> Body {
        Body::builder()
            .size(DVec3::ONE)
            .position(DVec3::new(0.0, 0.5, 0.0))
            .velocity(velocity)
            .friction(0.1, kinetic)
            .build()
            .unwrap()
    }

    #[test]
    fn test_stiction_stops_slow_bodies() {
        let friction = Friction::new(0.0, 0.0);
        let mut body = sliding_body(DVec3::new(0.2, 0.0, 0.1), 0.1);
        friction.apply(&mut body, &ForceContext::new(0.01, true));
        assert_eq!(body.velocity(), DVec3::ZERO);
    }

    #[test]
    fn test_stiction_cancels_weak_horizontal_pull() {
        let friction = Friction::new(0.6, 0.4);
        let mut body = sliding_body(DVec3::ZERO, 0.1);
        body.apply_force(DVec3::new(2.0, 0.0, -1.0));
        friction.apply(&mut body, &ForceContext::new(0.01, true));
        assert_eq!(body.acceleration(), DVec3::ZERO);

        body.integrate(0.01);
        assert_eq!(body.velocity(), DVec3::ZERO);
        assert_eq!(body.position(), DVec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_strong_pull_breaks_stiction() {
        let friction = Friction::new(0.6, 0.4);
        let mut body = sliding_body(DVec3::ZERO, 0.1);
        // 0.01 s at 500 m/s² reaches 5 m/s, past the 1.8 m/s hold
        body.apply_force(DVec3::new(500.0, 0.0, 0.0));
        friction.apply(&mut body, &ForceContext::new(0.01, true));
        assert_eq!(body.acceleration().x, 500.0);
    }

    #[test]
    fn test_kinetic_friction_slows_along_motion() {
        let friction = Friction::new(0.0, 0.0);
        let mut body = sliding_body(DVec3::new(3.0, 0.0, 4.0), 0.5);
        friction.apply(&mut body, &ForceContext::new(0.1, true));

        // decrement = 0.5 * 6 * 1 * 0.1 = 0.3 along (0.6, 0, 0.8)
        let v = body.velocity();
        assert!((v.x - (3.0 - 0.18)).abs() < 1e-12);
        assert!((v.z - (4.0 - 0.24)).abs() < 1e-12);
    }

    #[test]
    fn test_friction_never_reverses_motion() {
        let friction = Friction::new(0.0, 0.0);
        let mut body = sliding_body(DVec3::new(1.0, 0.0, 0.0), 1.0);
        friction.apply(&mut body, &ForceContext::new(1.0, true));
        assert_eq!(body.velocity().x, 0.0);
    }

    #[test]
    fn test_uses_larger_of_body_and_floor_coefficients() {
        let floor = Friction::new(0.0, 2.0);
        let mut body = sliding_body(DVec3::new(5.0, 0.0, 0.0), 0.1);
        floor.apply(&mut body, &ForceContext::new(0.1, true));
        // floor kinetic 2.0 wins: 5 - 2*6*0.1
        assert!((body.velocity().x - 3.8).abs() < 1e-12);
    }

    #[test]
    fn test_airborne_bodies_keep_velocity() {
        let friction = Friction::new(0.6, 0.4);
        let mut body = Body::builder()
            .position(DVec3::new(0.0, 3.0, 0.0))
            .velocity(DVec3::new(5.0, 0.0, 0.0))
            .build()
            .unwrap();
        friction.apply(&mut body, &ForceContext::new(0.01, true));
        assert_eq!(body.velocity().x, 5.0);
    }

    #[test]
    fn test_vertical_velocity_untouched() {
        let friction = Friction::new(0.6, 0.4);
        let mut body = sliding_body(DVec3::new(0.0, -1.0, 0.0), 0.1);
        friction.apply(&mut body, &ForceContext::new(0.01, true));
        assert_eq!(body.velocity().y, -1.0);
    }
}
