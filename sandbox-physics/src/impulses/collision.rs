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
//! Restitution response between two colliding bodies
//!
//! With `n` the contact normal pointing from `a` to `b` and
//! `v_rel = v_b - v_a`, approaching bodies (`v_rel·n < 0`) exchange
//!
//! **J = -(1 + e)(v_rel·n) / (1/m_a + 1/m_b)**
//!
//! of which only [`IMPULSE_FRACTION`] reaches the velocities. Static bodies
//! contribute an inverse mass of zero and are never written. The impulse also
//! leaves a torque on each movable body about the contact point, then damps
//! horizontal sliding across the contact.
//!
//! A response may name an anchored side: the lower body of a vertical
//! contact that is itself held up by the ground, a static body or a settled
//! stack. The anchored side is treated as static, and once the upper body's
//! remaining approach speed drops to [`REST_SPEED`] it is brought to rest on
//! top of it.

use glam::DVec3;
use tracing::debug;

use super::{Impulse, ImpulseContext};
use crate::body::{Body, BodyHandle, REST_SPEED};

/// Fraction of the restitution impulse applied to the velocities
pub const IMPULSE_FRACTION: f64 = 0.8;

/// Contact friction decay rate per unit of friction coefficient
pub const CONTACT_FRICTION_RATE: f64 = 3.0;

/// Sliding components below this speed are snapped to zero after contact friction
pub const CONTACT_SNAP_SPEED: f64 = 0.01;

/// Velocity response for one colliding pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionImpulse {
    a: BodyHandle,
    b: BodyHandle,
    normal: DVec3,
    contact: DVec3,
    anchor: Option<BodyHandle>,
}

impl CollisionImpulse {
    /// Create a response for the pair `(a, b)`
    ///
    /// `normal` must be a unit vector pointing from `a` towards `b`.
    pub fn new(a: BodyHandle, b: BodyHandle, normal: DVec3, contact: DVec3) -> Self {
        CollisionImpulse {
            a,
            b,
            normal,
            contact,
            anchor: None,
        }
    }

    /// Hold `anchor` in place for this response
    ///
    /// `anchor` must be one of the pair and should be the lower body of a
    /// vertical contact. Any other handle leaves the response unanchored.
    pub fn with_anchor(mut self, anchor: BodyHandle) -> Self {
        if anchor == self.a || anchor == self.b {
            self.anchor = Some(anchor);
        }
        self
    }

    /// First body of the pair
    pub fn a(&self) -> BodyHandle {
        self.a
    }

    /// Second body of the pair
    pub fn b(&self) -> BodyHandle {
        self.b
    }

    /// Contact normal from `a` to `b`
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Contact point (center of the overlap region)
    pub fn contact(&self) -> DVec3 {
        self.contact
    }

    /// Side held in place for this response, if any
    pub fn anchor(&self) -> Option<BodyHandle> {
        self.anchor
    }

    /// Restitution for the pair, capped at `ceiling`
    ///
    /// The bouncier body wins between two movable bodies. Against a static
    /// body the static side's surface decides.
    pub fn restitution(a: &Body, b: &Body, ceiling: f64) -> f64 {
        let e = match (a.is_immovable(), b.is_immovable()) {
            (true, false) => a.material().bounciness,
            (false, true) => b.material().bounciness,
            _ => a.material().bounciness.max(b.material().bounciness),
        };
        e.min(ceiling)
    }

    /// Apply the response and return how many bodies it changed
    fn resolve(&self, a: &mut Body, b: &mut Body, ctx: &ImpulseContext<'_>) -> usize {
        let n = self.normal;
        let approach = (b.velocity() - a.velocity()).dot(n);
        if approach >= 0.0 {
            return 0;
        }

        let moves_a = !a.is_immovable() && self.anchor != Some(self.a);
        let moves_b = !b.is_immovable() && self.anchor != Some(self.b);
        let inv_a = if moves_a { a.mass().inverse() } else { 0.0 };
        let inv_b = if moves_b { b.mass().inverse() } else { 0.0 };
        let inv_sum = inv_a + inv_b;
        if inv_sum <= 0.0 {
            return 0;
        }

        let e = Self::restitution(a, b, ctx.restitution_ceiling);
        let j = -(1.0 + e) * approach / inv_sum;
        let impulse = n * j;

        if moves_a {
            a.velocity -= impulse * (IMPULSE_FRACTION * inv_a);
            let lever_arm = self.contact - a.position();
            a.apply_torque(lever_arm.cross(-impulse));
        }
        if moves_b {
            b.velocity += impulse * (IMPULSE_FRACTION * inv_b);
            let lever_arm = self.contact - b.position();
            b.apply_torque(lever_arm.cross(impulse));
        }

        let mu = (a.material().kinetic_friction + b.material().kinetic_friction) * 0.5;
        let factor = (1.0 - mu * CONTACT_FRICTION_RATE * ctx.dt).max(0.0);
        if moves_a {
            apply_contact_friction(a, n, factor);
        }
        if moves_b {
            apply_contact_friction(b, n, factor);
        }

        match self.anchor {
            Some(anchor) if anchor == self.a => settle_on(b, a, n),
            Some(_) => settle_on(a, b, -n),
            None => {}
        }

        usize::from(moves_a) + usize::from(moves_b)
    }
}

/// Bring `upper` to rest on `lower` once it barely moves along `normal`
///
/// `normal` points from `lower` to `upper`.
fn settle_on(upper: &mut Body, lower: &Body, normal: DVec3) {
    let residual = (upper.velocity - lower.velocity).dot(normal);
    if upper.is_immovable() || residual.abs() > REST_SPEED {
        return;
    }
    upper.velocity -= normal * residual;
    upper.acceleration -= normal * upper.acceleration.dot(normal);
    upper.supported = true;
}

/// Damp the horizontal velocity components that slide across the contact
fn apply_contact_friction(body: &mut Body, normal: DVec3, factor: f64) {
    for axis in [0, 2] {
        if normal[axis] != 0.0 {
            continue;
        }
        let mut component = body.velocity[axis] * factor;
        if component.abs() < CONTACT_SNAP_SPEED {
            component = 0.0;
        }
        body.velocity[axis] = component;
    }
}

/// Borrow two distinct bodies mutably
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> Option<(&mut Body, &mut Body)> {
    if a == b || a >= bodies.len() || b >= bodies.len() {
        return None;
    }
    if a < b {
        let (head, tail) = bodies.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}

impl Impulse for CollisionImpulse {
    fn apply(self: Box<Self>, bodies: &mut [Body], ctx: &mut ImpulseContext<'_>) -> usize {
        let Some((a, b)) = pair_mut(bodies, self.a.index(), self.b.index()) else {
            debug!("Skipping collision impulse for invalid pair {} / {}", self.a, self.b);
            return 0;
        };
        self.resolve(a, b, ctx)
    }

    fn name(&self) -> &str {
        "collision"
    }
}
