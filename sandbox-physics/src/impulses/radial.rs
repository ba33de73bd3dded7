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
//! Radial impulses (explosions and generic pushes)
//!
//! Every movable body receives an impulse (N·s) directed from the origin to
//! its center with strength
//!
//! **s = falloff(d, r) · magnitude / (m + 1)**
//!
//! The impulse changes velocity directly, so the same explosion delivers the
//! same velocity change whatever the step length. Bodies lying flat on the
//! ground are pushed through their center so a resting box does not start
//! spinning in place. Everything else is pushed at a random point inside its
//! extents, which makes debris tumble.

use glam::DVec3;
use rand::Rng;

use super::{Falloff, Impulse, ImpulseContext, MIN_DISTANCE, NEGLIGIBLE_FALLOFF};
use crate::body::Body;

/// Pitch/roll tolerance in degrees for "lying flat"
const LEVEL_TOLERANCE: f64 = 1.0;

/// Radial push away from an origin with distance falloff
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use sandbox_physics::{RadialImpulse, World, WorldConfig, Body};
///
/// let mut world = World::new(WorldConfig::vacuum(0.0)).unwrap();
/// let crate_box = world.add_body(
///     Body::builder().position(DVec3::new(2.0, 0.0, 0.0)).build().unwrap(),
/// );
///
/// world.add_impulse(RadialImpulse::explosion(DVec3::ZERO, 20.0, 5.0));
/// world.step(0.008);
///
/// assert!(world.body(crate_box).unwrap().velocity().x > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadialImpulse {
    origin: DVec3,
    magnitude: f64,
    radius: f64,
    falloff: Falloff,
}

impl RadialImpulse {
    /// Create a radial impulse
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive or either value is not finite.
    pub fn new(origin: DVec3, magnitude: f64, radius: f64, falloff: Falloff) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite() && magnitude.is_finite() && origin.is_finite(),
            "Impulse radius must be positive and all parameters finite"
        );
        RadialImpulse {
            origin,
            magnitude,
            radius,
            falloff,
        }
    }

    /// Explosion with exponential falloff
    pub fn explosion(origin: DVec3, magnitude: f64, radius: f64) -> Self {
        Self::new(origin, magnitude, radius, Falloff::Exponential)
    }

    /// Origin of the push
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Peak magnitude
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Effective radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Impulse this explosion would deliver to `body`, if not negligible
    pub fn push_for(&self, body: &Body) -> Option<DVec3> {
        if body.is_immovable() {
            return None;
        }
        let offset = body.position() - self.origin;
        let distance = offset.length();
        let falloff = self.falloff.evaluate(distance, self.radius);
        if falloff <= NEGLIGIBLE_FALLOFF {
            return None;
        }
        let direction = offset / distance.max(MIN_DISTANCE);
        let strength = falloff * self.magnitude / (body.mass().value() + 1.0);
        Some(direction * strength)
    }
}

impl Impulse for RadialImpulse {
    fn apply(self: Box<Self>, bodies: &mut [Body], ctx: &mut ImpulseContext<'_>) -> usize {
        let mut affected = 0;
        for body in bodies.iter_mut() {
            let Some(push) = self.push_for(body) else {
                continue;
            };

            if body.is_resting_on_ground() && body.rotation().is_level(LEVEL_TOLERANCE) {
                body.apply_impulse(push);
            } else {
                let rng = ctx.rng();
                let jitter = DVec3::new(
                    rng.gen_range(-0.5..=0.5),
                    rng.gen_range(-0.5..=0.5),
                    rng.gen_range(-0.5..=0.5),
                );
                let point = body.position() + jitter * body.size();
                body.apply_impulse_at_point(push, point);
            }
            affected += 1;
        }
        affected
    }

    fn name(&self) -> &str {
        "radial"
    }
}
