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
//! Collision detection and resolution
//!
//! The collision pass is stateless. Bodies are visited in insertion order:
//! each body is first checked against the ground plane, then against every
//! body after it (brute-force O(n²) with no broad phase).
//!
//! Positional correction happens immediately during the sweep. Velocity
//! responses are collected as [`CollisionImpulse`]s and returned in a
//! [`CollisionReport`] so the caller can apply them after the sweep has seen
//! every pair.
//!
//! Each sweep also recomputes which bodies rest on top of others
//! ([`Body::is_supported`]); gravity leaves those bodies alone on the next
//! step, the same way it leaves bodies on the ground plane alone.
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use sandbox_physics::Body;
//! use sandbox_physics::collision::detect_and_resolve;
//!
//! let cube = |x: f64| Body::builder()
//!     .size(DVec3::ONE)
//!     .position(DVec3::new(x, 2.0, 0.0))
//!     .build()
//!     .unwrap();
//! let mut bodies = vec![cube(0.0), cube(0.5)];
//!
//! let report = detect_and_resolve(&mut bodies, true, 1.0);
//! assert_eq!(report.body_contacts(), 1);
//! assert!(!bodies[0].is_colliding(&bodies[1]));
//! ```

mod ground;
mod pairwise;

pub use ground::resolve_ground;
pub use pairwise::{mark_supported, penetration, resolve_pair, separate, Penetration};

use crate::body::Body;
use crate::impulses::CollisionImpulse;

/// Outcome of one collision sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Number of bodies resolved against the ground plane
    pub ground_contacts: usize,
    /// Velocity responses awaiting application, one per colliding pair
    pub impulses: Vec<CollisionImpulse>,
}

impl CollisionReport {
    /// Number of colliding body pairs
    pub fn body_contacts(&self) -> usize {
        self.impulses.len()
    }
}

/// Run one collision sweep over `bodies`
///
/// Ground contacts are only resolved when `has_floor` is set. Collision
/// impulses are returned unapplied.
pub fn detect_and_resolve(
    bodies: &mut [Body],
    has_floor: bool,
    restitution_ceiling: f64,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    mark_supported(bodies, has_floor);

    for i in 0..bodies.len() {
        if has_floor && resolve_ground(&mut bodies[i], restitution_ceiling) {
            report.ground_contacts += 1;
        }
        for j in (i + 1)..bodies.len() {
            if let Some(impulse) = resolve_pair(bodies, i, j, has_floor) {
                report.impulses.push(impulse);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyHandle;
    use glam::DVec3;

    fn cube(position: DVec3) -> Body {
        Body::builder()
            .size(DVec3::ONE)
            .position(position)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sweep_counts_contacts() {
        let mut bodies = vec![
            cube(DVec3::new(0.0, 0.3, 0.0)),
            cube(DVec3::new(0.0, 3.0, 0.0)),
            cube(DVec3::new(0.2, 3.5, 0.0)),
            cube(DVec3::new(10.0, 5.0, 0.0)),
        ];
        let report = detect_and_resolve(&mut bodies, true, 1.0);
        assert_eq!(report.ground_contacts, 1);
        assert_eq!(report.body_contacts(), 1);
        assert_eq!(bodies[0].position().y, 0.5);
    }

    #[test]
    fn test_no_floor_skips_ground() {
        let mut bodies = vec![cube(DVec3::new(0.0, -4.0, 0.0))];
        let report = detect_and_resolve(&mut bodies, false, 1.0);
        assert_eq!(report.ground_contacts, 0);
        assert_eq!(bodies[0].position().y, -4.0);
    }

    #[test]
    fn test_landing_on_grounded_body_never_pushes_it_down() {
        let mut bodies = vec![
            cube(DVec3::new(0.0, 0.5, 0.0)),
            cube(DVec3::new(0.2, 1.4, 0.0)),
        ];
        bodies[1].set_velocity(DVec3::new(0.0, -2.0, 0.0));
        let report = detect_and_resolve(&mut bodies, true, 1.0);

        assert_eq!(report.impulses[0].anchor(), Some(BodyHandle::new(0)));
        assert_eq!(bodies[0].position(), DVec3::new(0.0, 0.5, 0.0));
        assert!((bodies[1].min().y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_touching_stack_stays_supported() {
        let mut bodies = vec![
            cube(DVec3::new(0.0, 0.5, 0.0)),
            cube(DVec3::new(0.0, 1.5, 0.0)),
            cube(DVec3::new(0.3, 2.5, 0.0)),
            cube(DVec3::new(4.0, 1.5, 0.0)),
        ];
        let report = detect_and_resolve(&mut bodies, true, 1.0);

        assert_eq!(report.body_contacts(), 0);
        assert!(!bodies[0].is_supported());
        assert!(bodies[1].is_supported());
        assert!(bodies[2].is_supported());
        assert!(!bodies[3].is_supported());

        // Without a floor nothing holds the bottom box up
        let report = detect_and_resolve(&mut bodies, false, 1.0);
        assert_eq!(report.body_contacts(), 0);
        assert!(bodies.iter().all(|body| !body.is_supported()));
    }

    #[test]
    fn test_sweep_leaves_velocities_alone() {
        let mut bodies = vec![cube(DVec3::new(0.0, 2.0, 0.0)), cube(DVec3::new(0.5, 2.0, 0.0))];
        bodies[0].set_velocity(DVec3::new(1.0, 0.0, 0.0));
        let report = detect_and_resolve(&mut bodies, true, 1.0);
        assert_eq!(report.impulses.len(), 1);
        assert_eq!(bodies[0].velocity(), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(bodies[1].velocity(), DVec3::ZERO);
    }
}
