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
//! Aerodynamic drag and wind
//!
//! Both generators share the quadratic drag law, evaluated per axis:
//!
//! **F_i = ½ · ρ · u_i · |u_i| · C_d · A**
//!
//! where `u` is the flow velocity relative to the body, `ρ` the air density,
//! `C_d` the body's drag coefficient and `A` its cross-section perpendicular
//! to `u` (see [`cross_sectional_area`]).
//!
//! - [`Drag`] uses the body's own velocity and opposes it.
//! - [`Wind`] uses a constant ambient wind vector and pushes along it.

use glam::DVec3;

use super::cross_section::cross_sectional_area;
use super::{ForceContext, ForceGenerator};
use crate::body::Body;

/// Flow speeds below this produce no aerodynamic force
const MIN_FLOW_SPEED: f64 = 1e-6;

/// Quadratic aerodynamic force for a flow `flow` over `body`
///
/// The result points along `flow`. Returns zero for zero density, zero drag
/// coefficient or negligible flow.
pub fn aerodynamic_force(body: &Body, flow: DVec3, density: f64) -> DVec3 {
    let coefficient = body.material().drag;
    if density <= 0.0 || coefficient <= 0.0 || flow.length() < MIN_FLOW_SPEED {
        return DVec3::ZERO;
    }
    let area = cross_sectional_area(body, flow);
    flow * flow.abs() * (0.5 * density * coefficient * area)
}

fn validate_density(density: f64) {
    assert!(
        density >= 0.0 && density.is_finite(),
        "Air density must be non-negative and finite"
    );
}

/// Drag opposing each body's motion through still air
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    density: f64,
}

impl Drag {
    /// Create drag for the given air density (kg/m³)
    ///
    /// # Panics
    ///
    /// Panics if `density` is negative or not finite.
    pub fn new(density: f64) -> Self {
        validate_density(density);
        Drag { density }
    }

    /// Air density
    pub fn density(&self) -> f64 {
        self.density
    }
}

impl ForceGenerator for Drag {
    fn apply(&self, body: &mut Body, ctx: &ForceContext) {
        if body.is_immovable() {
            return;
        }
        let velocity = body.velocity();
        let force = -aerodynamic_force(body, velocity, self.density);
        if force == DVec3::ZERO {
            return;
        }

        // Drag may slow a component to rest within a step but never reverse it
        let mut acceleration = force * body.mass().inverse();
        if ctx.dt > 0.0 {
            for axis in 0..3 {
                let limit = velocity[axis].abs() / ctx.dt;
                acceleration[axis] = acceleration[axis].clamp(-limit, limit);
            }
        }
        body.apply_force(acceleration * body.mass().value());
    }

    fn name(&self) -> &str {
        "drag"
    }
}

/// Constant ambient wind pushing every body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    density: f64,
    velocity: DVec3,
}

impl Wind {
    /// Create wind with the given air density and wind velocity
    ///
    /// # Panics
    ///
    /// Panics if `density` is negative or either argument is not finite.
    pub fn new(density: f64, velocity: DVec3) -> Self {
        validate_density(density);
        assert!(velocity.is_finite(), "Wind velocity must be finite");
        Wind { density, velocity }
    }

    /// Air density
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Wind velocity
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }
}

impl ForceGenerator for Wind {
    fn apply(&self, body: &mut Body, _ctx: &ForceContext) {
        if body.is_immovable() {
            return;
        }
        let force = aerodynamic_force(body, self.velocity, self.density);
        if force != DVec3::ZERO {
            body.apply_force(force);
        }
    }

    fn name(&self) -> &str {
        "wind"
    }
}
