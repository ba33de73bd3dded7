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
//! Continuous force generators
//!
//! Force generators run every step for every movable body. Most accumulate
//! into the body's acceleration through [`Body::apply_force`]; ground
//! friction works directly in the velocity domain.
//!
//! # Generators
//!
//! - [`Gravity`]: constant vertical pull proportional to mass
//! - [`Friction`]: static/kinetic ground friction
//! - [`Drag`]: aerodynamic drag opposing the body's own velocity
//! - [`Wind`]: aerodynamic push from a constant ambient wind
//!
//! Custom generators implement [`ForceGenerator`]:
//!
//! ```
//! use glam::DVec3;
//! use sandbox_physics::{Body, ForceContext, ForceGenerator};
//!
//! struct Thruster {
//!     thrust: DVec3,
//! }
//!
//! impl ForceGenerator for Thruster {
//!     fn apply(&self, body: &mut Body, _ctx: &ForceContext) {
//!         body.apply_force(self.thrust);
//!     }
//!
//!     fn name(&self) -> &str {
//!         "thruster"
//!     }
//! }
//! ```

use crate::body::Body;

mod aero;
mod cross_section;
mod friction;
mod gravity;

pub use aero::{aerodynamic_force, Drag, Wind};
pub use cross_section::{convex_hull, cross_sectional_area, polygon_area};
pub use friction::{Friction, KINETIC_FRICTION_SCALE, SLIDE_SNAP_SPEED, STICTION_FACTOR};
pub use gravity::{Gravity, STANDARD_GRAVITY};

/// Per-step information handed to every force generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContext {
    /// Step duration in seconds
    pub dt: f64,
    /// Whether the world has a ground plane at y = 0
    pub has_floor: bool,
}

impl ForceContext {
    /// Create a context for one step
    pub fn new(dt: f64, has_floor: bool) -> Self {
        ForceContext { dt, has_floor }
    }

    /// Check whether `body` is touching the ground plane this step
    pub fn is_grounded(&self, body: &Body) -> bool {
        self.has_floor && body.is_on_ground()
    }
}

/// A standing force applied to every movable body every step
///
/// Implementations must leave static bodies untouched.
pub trait ForceGenerator: Send + Sync {
    /// Apply this generator's effect to one body
    fn apply(&self, body: &mut Body, ctx: &ForceContext);

    /// Get a descriptive name for this generator
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_grounded_requires_floor() {
        let body = Body::builder()
            .size(DVec3::ONE)
            .position(DVec3::new(0.0, 0.5, 0.0))
            .build()
            .unwrap();
        assert!(ForceContext::new(0.01, true).is_grounded(&body));
        assert!(!ForceContext::new(0.01, false).is_grounded(&body));
    }
}
