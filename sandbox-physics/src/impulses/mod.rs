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
//! One-shot impulse generators
//!
//! Impulses capture their parameters when constructed and are consumed by a
//! single call to [`Impulse::apply`]. The world queues them with
//! [`World::add_impulse`](crate::World::add_impulse) and drains the queue
//! every step, so an impulse never outlives the step it was applied in.
//!
//! # Impulses
//!
//! - [`RadialImpulse`]: explosion-style push away from an origin with distance falloff
//! - [`CollisionImpulse`]: restitution response between two colliding bodies
//! - [`CursorImpulse`]: user-aimed push on one body at a chosen point

use rand::rngs::StdRng;

use crate::body::Body;

mod collision;
mod cursor;
mod radial;

pub use collision::{CollisionImpulse, CONTACT_FRICTION_RATE, CONTACT_SNAP_SPEED, IMPULSE_FRACTION};
pub use cursor::{CursorImpulse, MAX_DIAL, MIN_DIAL};
pub use radial::RadialImpulse;

/// Falloff values below this are treated as negligible and skipped
pub const NEGLIGIBLE_FALLOFF: f64 = 0.01;

/// Floor applied to distances and radii before dividing by them
pub const MIN_DISTANCE: f64 = 0.01;

/// Distance falloff of an impulse, mapping `(distance, radius)` into `[0, 1]`
#[derive(Debug, Clone, Copy, Default)]
pub enum Falloff {
    /// `e^(-d/r)`: never reaches zero
    #[default]
    Exponential,
    /// `1 / max(d², 1)`
    InverseSquare,
    /// `max(0, 1 - d/r)`
    Linear,
    /// Full strength at any distance
    Constant,
    /// User-supplied decay function
    Custom(fn(f64, f64) -> f64),
}

impl Falloff {
    /// Evaluate the falloff, clamped into `[0, 1]`
    ///
    /// Non-finite custom results evaluate to 0.
    pub fn evaluate(&self, distance: f64, radius: f64) -> f64 {
        let radius = radius.max(MIN_DISTANCE);
        let value = match self {
            Falloff::Exponential => (-distance / radius).exp(),
            Falloff::InverseSquare => 1.0 / (distance * distance).max(1.0),
            Falloff::Linear => 1.0 - distance / radius,
            Falloff::Constant => 1.0,
            Falloff::Custom(decay) => decay(distance, radius),
        };
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Per-step state available to impulses while they are applied
pub struct ImpulseContext<'a> {
    /// Step duration in seconds
    pub dt: f64,
    /// Upper bound on restitution coefficients
    pub restitution_ceiling: f64,
    rng: &'a mut StdRng,
}

impl<'a> ImpulseContext<'a> {
    /// Create a context for one step
    pub fn new(dt: f64, restitution_ceiling: f64, rng: &'a mut StdRng) -> Self {
        ImpulseContext {
            dt,
            restitution_ceiling,
            rng,
        }
    }

    /// Seeded random source shared by every impulse in the step
    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }
}

/// A one-shot perturbation consumed on application
///
/// Taking `self: Box<Self>` makes single use a property of ownership: once
/// applied, the impulse is gone.
pub trait Impulse: Send {
    /// Apply the impulse to the bodies it affects
    ///
    /// Returns the number of bodies that were affected. Static bodies are
    /// never affected.
    fn apply(self: Box<Self>, bodies: &mut [Body], ctx: &mut ImpulseContext<'_>) -> usize;

    /// Get a descriptive name for this impulse
    fn name(&self) -> &str;
}
