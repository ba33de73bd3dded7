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
//! Numerical integration of body motion
//!
//! The world advances every body with [`SemiImplicitEuler`]: velocity is
//! updated from the accumulated acceleration first and position follows from
//! the new velocity. Rotation is advanced in the same pass.
//!
//! # Timestep Guidelines
//!
//! - Non-positive or non-finite timesteps are rejected by [`validate_timestep`]
//! - Contact handling assumes small steps; clamp frame times to about 8 ms
//! - At 1/60 s a resting body gains more than the rest threshold from one step
//!   of gravity and keeps micro-bouncing, so prefer 1/120 s or smaller

use glam::DVec3;

use crate::body::Body;
use crate::error::PhysicsError;

mod euler;

pub use euler::SemiImplicitEuler;

/// Check that `dt` can be used as a step duration
///
/// # Errors
///
/// Returns [`PhysicsError::InvalidTimestep`] for zero, negative, NaN or
/// infinite values.
pub fn validate_timestep(dt: f64) -> Result<(), PhysicsError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimestep(dt))
    }
}

/// Total kinetic energy of every movable body
pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Total linear momentum of every movable body
pub fn total_momentum(bodies: &[Body]) -> DVec3 {
    bodies.iter().map(Body::momentum).sum()
}

/// Trait for numerical integration methods
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance every movable body by `dt`
    ///
    /// Static bodies are skipped. Returns the number of bodies whose linear
    /// state was updated.
    fn integrate(&self, bodies: &mut [Body], dt: f64) -> usize;
}
