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
//! Uniform gravitational field
//!
//! Near a planetary surface gravity is well approximated by a constant
//! downward acceleration, so the force on a body is simply:
//!
//! **F = (0, g·m, 0)**
//!
//! Bodies resting on the ground plane are skipped. The ground resolver snaps
//! them to the surface and zeroes their motion; pulling them down again every
//! step would only make them sink and jitter. Bodies settled on top of other
//! bodies ([`Body::is_supported`]) are skipped for the same reason.

use glam::DVec3;

use super::{ForceContext, ForceGenerator};
use crate::body::Body;

/// Standard gravity at the Earth's surface (m/s², pointing down)
pub const STANDARD_GRAVITY: f64 = -9.81;

/// Constant vertical gravity
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use sandbox_physics::{Body, ForceContext, ForceGenerator, Gravity};
///
/// let gravity = Gravity::new(-9.8);
/// let mut body = Body::builder()
///     .mass(2.0)
///     .position(DVec3::new(0.0, 10.0, 0.0))
///     .build()
///     .unwrap();
///
/// gravity.apply(&mut body, &ForceContext::new(0.008, true));
/// assert_eq!(body.acceleration(), DVec3::new(0.0, -9.8, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    acceleration: f64,
}

impl Gravity {
    /// Create gravity with the given vertical acceleration (negative pulls down)
    ///
    /// # Panics
    ///
    /// Panics if `acceleration` is not finite.
    pub fn new(acceleration: f64) -> Self {
        assert!(acceleration.is_finite(), "Gravity must be finite");
        Gravity { acceleration }
    }

    /// Get the vertical acceleration
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::new(STANDARD_GRAVITY)
    }
}

impl ForceGenerator for Gravity {
    fn apply(&self, body: &mut Body, ctx: &ForceContext) {
        if body.is_immovable() || ctx.is_grounded(body) || body.is_supported() {
            return;
        }
        let weight = self.acceleration * body.mass().value();
        body.apply_force(DVec3::new(0.0, weight, 0.0));
    }

    fn name(&self) -> &str {
        "gravity"
    }
}
