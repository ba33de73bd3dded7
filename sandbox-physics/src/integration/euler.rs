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
//! Semi-implicit Euler integrator implementation
//!
//! # Algorithm
//!
//! ```text
//! v(t + dt) = v(t) + a(t)*dt
//! x(t + dt) = x(t) + v(t + dt)*dt
//! ```
//!
//! # Properties
//!
//! - **Symplectic**: bounded energy error for conservative forces
//! - **First-order accurate**: global error O(dt)
//! - **One force evaluation per step**: forces are accumulated before integration
//!
//! # References
//!
//! - Hairer, E., Lubich, C., & Wanner, G. (2006). Geometric Numerical Integration:
//!   Structure-Preserving Algorithms for Ordinary Differential Equations (2nd ed.).
//!   Springer. Section I.1.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::Integrator;
use crate::body::Body;

/// Semi-implicit (symplectic) Euler integrator
///
/// With the `parallel` feature bodies are integrated on the rayon thread
/// pool. Each body is independent, so the result matches the sequential path.
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use sandbox_physics::Body;
/// use sandbox_physics::integration::{Integrator, SemiImplicitEuler};
///
/// let mut bodies = vec![Body::builder().velocity(DVec3::X).build().unwrap()];
/// let updated = SemiImplicitEuler.integrate(&mut bodies, 0.5);
///
/// assert_eq!(updated, 1);
/// assert_eq!(bodies[0].position(), DVec3::new(0.5, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SemiImplicitEuler;

fn advance(body: &mut Body, dt: f64) -> usize {
    if body.is_immovable() {
        return 0;
    }
    let moved = body.integrate(dt);
    body.integrate_rotation(dt);
    usize::from(moved)
}

impl Integrator for SemiImplicitEuler {
    fn name(&self) -> &str {
        "Semi-implicit Euler"
    }

    #[cfg(not(feature = "parallel"))]
    fn integrate(&self, bodies: &mut [Body], dt: f64) -> usize {
        bodies.iter_mut().map(|body| advance(body, dt)).sum()
    }

    #[cfg(feature = "parallel")]
    fn integrate(&self, bodies: &mut [Body], dt: f64) -> usize {
        bodies.par_iter_mut().map(|body| advance(body, dt)).sum()
    }
}
