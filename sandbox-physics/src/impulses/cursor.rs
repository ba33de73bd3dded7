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
//! User-aimed pushes on a single body

use glam::DVec3;
use tracing::debug;

use super::{Impulse, ImpulseContext};
use crate::body::{Body, BodyHandle};

/// Lowest strength dial setting (impulse `2^0 = 1` N·s)
pub const MIN_DIAL: f64 = 0.0;

/// Highest strength dial setting (impulse `2^16` N·s)
pub const MAX_DIAL: f64 = 16.0;

/// Push one body at a chosen point
///
/// The strength dial is exponential: each step doubles the impulse. The
/// impulse changes velocity directly, independent of the step length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorImpulse {
    target: BodyHandle,
    point: DVec3,
    direction: DVec3,
    dial: f64,
}

impl CursorImpulse {
    /// Create a push on `target` at world-space `point` along `direction`
    ///
    /// `dial` is clamped into `[MIN_DIAL, MAX_DIAL]`; a non-finite dial falls
    /// back to `MIN_DIAL`.
    pub fn new(target: BodyHandle, point: DVec3, direction: DVec3, dial: f64) -> Self {
        let dial = if dial.is_finite() {
            dial.clamp(MIN_DIAL, MAX_DIAL)
        } else {
            MIN_DIAL
        };
        CursorImpulse {
            target,
            point,
            direction,
            dial,
        }
    }

    /// Targeted body
    pub fn target(&self) -> BodyHandle {
        self.target
    }

    /// Clamped dial setting
    pub fn dial(&self) -> f64 {
        self.dial
    }

    /// Impulse magnitude `2^dial` in N·s
    pub fn strength(&self) -> f64 {
        self.dial.exp2()
    }

    /// Impulse vector, or `None` for a zero or non-finite direction
    pub fn impulse(&self) -> Option<DVec3> {
        self.direction
            .try_normalize()
            .map(|direction| direction * self.strength())
    }
}

impl Impulse for CursorImpulse {
    fn apply(self: Box<Self>, bodies: &mut [Body], _ctx: &mut ImpulseContext<'_>) -> usize {
        let Some(body) = bodies.get_mut(self.target.index()) else {
            debug!("Cursor impulse targets unknown {}", self.target);
            return 0;
        };
        if body.is_immovable() {
            debug!("Cursor impulse ignored for static {}", self.target);
            return 0;
        }
        let Some(impulse) = self.impulse() else {
            debug!("Cursor impulse with degenerate direction {:?}", self.direction);
            return 0;
        };
        body.apply_impulse_at_point(impulse, self.point);
        1
    }

    fn name(&self) -> &str {
        "cursor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn apply(impulse: CursorImpulse, bodies: &mut [Body]) -> usize {
        apply_with_dt(impulse, bodies, 0.008)
    }

    fn apply_with_dt(impulse: CursorImpulse, bodies: &mut [Body], dt: f64) -> usize {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ctx = ImpulseContext::new(dt, 1.0, &mut rng);
        Box::new(impulse).apply(bodies, &mut ctx)
    }

    #[test]
    fn test_dial_is_clamped() {
        let handle = BodyHandle::new(0);
        assert_eq!(CursorImpulse::new(handle, DVec3::ZERO, DVec3::X, 40.0).dial(), MAX_DIAL);
        assert_eq!(CursorImpulse::new(handle, DVec3::ZERO, DVec3::X, -3.0).dial(), MIN_DIAL);
        assert_eq!(CursorImpulse::new(handle, DVec3::ZERO, DVec3::X, f64::NAN).dial(), MIN_DIAL);
        assert_eq!(CursorImpulse::new(handle, DVec3::ZERO, DVec3::X, 3.0).strength(), 8.0);
    }

    #[test]
    fn test_push_at_offset_spins_target() {
        let mut bodies = vec![Body::builder().size(DVec3::ONE).build().unwrap()];
        let impulse = CursorImpulse::new(
            BodyHandle::new(0),
            DVec3::new(0.0, 0.5, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            2.0,
        );
        assert_eq!(apply(impulse, &mut bodies), 1);
        assert_eq!(bodies[0].velocity(), DVec3::new(4.0, 0.0, 0.0));
        // r = +y, J = +x => spin about -z
        assert_eq!(bodies[0].angular_velocity(), DVec3::new(0.0, 0.0, -2.0));
        assert_eq!(bodies[0].acceleration(), DVec3::ZERO);
    }

    #[test]
    fn test_push_ignores_step_length() {
        let push = CursorImpulse::new(BodyHandle::new(0), DVec3::ZERO, DVec3::Z, 5.0);
        let mut slow = vec![Body::builder().mass(4.0).build().unwrap()];
        let mut fast = slow.clone();
        apply_with_dt(push, &mut slow, 1.0 / 30.0);
        apply_with_dt(push, &mut fast, 0.001);
        assert_eq!(slow[0].velocity(), DVec3::new(0.0, 0.0, 8.0));
        assert_eq!(slow[0].velocity(), fast[0].velocity());
    }

    #[test]
    fn test_unknown_and_static_targets_ignored() {
        let mut bodies = vec![Body::builder().immovable().build().unwrap()];
        let on_static = CursorImpulse::new(BodyHandle::new(0), DVec3::ZERO, DVec3::Y, 4.0);
        let dangling = CursorImpulse::new(BodyHandle::new(9), DVec3::ZERO, DVec3::Y, 4.0);
        assert_eq!(apply(on_static, &mut bodies), 0);
        assert_eq!(apply(dangling, &mut bodies), 0);
        assert_eq!(bodies[0].velocity(), DVec3::ZERO);
    }

    #[test]
    fn test_zero_direction_is_noop() {
        let mut bodies = vec![Body::builder().build().unwrap()];
        let impulse = CursorImpulse::new(BodyHandle::new(0), DVec3::ZERO, DVec3::ZERO, 4.0);
        assert_eq!(apply(impulse, &mut bodies), 0);
        assert_eq!(bodies[0].velocity(), DVec3::ZERO);
    }
}
