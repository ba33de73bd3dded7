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
//! Body-to-body overlap detection and positional correction
//!
//! Overlapping boxes are separated along the axis of least penetration. The
//! velocity response is left to a [`CollisionImpulse`] so that every pair in
//! a sweep sees positions corrected but velocities untouched.
//!
//! A body held up from below (by the ground, a static body or a settled
//! stack) is never pushed down by the body landing on it. The upper body
//! takes the whole correction, and the response is anchored on the lower
//! one.

use glam::DVec3;

use crate::body::{Body, BodyHandle, GROUND_CONTACT_TOLERANCE, REST_SPEED};
use crate::impulses::CollisionImpulse;

/// Overlap between two bodies along their least-penetration axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Axis index (0 = X, 1 = Y, 2 = Z)
    pub axis: usize,
    /// Overlap depth along `axis`
    pub depth: f64,
    /// Unit normal pointing from the first body towards the second
    pub normal: DVec3,
    /// Center of the overlap region
    pub contact: DVec3,
}

/// Measure the overlap of two colliding bodies
///
/// Returns `None` when the bodies do not strictly overlap. Ties between axes
/// go to X, then Y, then Z.
pub fn penetration(a: &Body, b: &Body) -> Option<Penetration> {
    if !a.is_colliding(b) {
        return None;
    }

    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    let a_into_b = a_max - b_min;
    let b_into_a = b_max - a_min;
    let depths = a_into_b.min(b_into_a);

    let mut axis = 0;
    for candidate in 1..3 {
        if depths[candidate] < depths[axis] {
            axis = candidate;
        }
    }

    let offset = b.position()[axis] - a.position()[axis];
    let sign = if offset > 0.0 {
        1.0
    } else if offset < 0.0 {
        -1.0
    } else if a_into_b[axis] < b_into_a[axis] {
        1.0
    } else {
        -1.0
    };

    let mut normal = DVec3::ZERO;
    normal[axis] = sign;

    Some(Penetration {
        axis,
        depth: depths[axis],
        normal,
        contact: a.aabb().intersection(&b.aabb()).center(),
    })
}

/// Push two bodies apart along the penetration normal
///
/// Each movable body moves half the depth, or the full depth when the other
/// body is static.
pub fn separate(a: &mut Body, b: &mut Body, penetration: &Penetration) {
    let (share_a, share_b) = match (a.is_immovable(), b.is_immovable()) {
        (false, false) => (0.5, 0.5),
        (false, true) => (1.0, 0.0),
        (true, false) => (0.0, 1.0),
        (true, true) => return,
    };
    let push = penetration.normal * penetration.depth;
    a.position -= push * share_a;
    b.position += push * share_b;
}

/// Check whether `body` stays put when something lands on it
fn is_anchored(body: &Body, has_floor: bool) -> bool {
    body.is_immovable() || body.supported || (has_floor && body.is_resting_on_ground())
}

/// Check whether `upper` sits still on top of `lower` without overlapping it
fn rests_on(upper: &Body, lower: &Body) -> bool {
    let (upper_min, upper_max) = (upper.min(), upper.max());
    let (lower_min, lower_max) = (lower.min(), lower.max());
    let covers = upper_min.x < lower_max.x
        && lower_min.x < upper_max.x
        && upper_min.z < lower_max.z
        && lower_min.z < upper_max.z;
    covers
        && (upper_min.y - lower_max.y).abs() <= GROUND_CONTACT_TOLERANCE
        && (upper.velocity.y - lower.velocity.y).abs() <= REST_SPEED
}

/// Recompute which bodies sit still on top of a held-up body
///
/// Bodies are visited from the lowest up, so support spreads through a
/// whole stack in one pass whatever the insertion order.
pub fn mark_supported(bodies: &mut [Body], has_floor: bool) {
    for body in bodies.iter_mut() {
        body.supported = false;
    }
    let mut order: Vec<usize> = (0..bodies.len()).collect();
    order.sort_by(|&a, &b| bodies[a].min().y.total_cmp(&bodies[b].min().y));

    for (rank, &lower) in order.iter().enumerate() {
        if !is_anchored(&bodies[lower], has_floor) {
            continue;
        }
        for &upper in &order[rank + 1..] {
            if !bodies[upper].is_immovable() && rests_on(&bodies[upper], &bodies[lower]) {
                bodies[upper].supported = true;
            }
        }
    }
}

/// Detect, separate and queue the response for bodies `i` and `j`
///
/// `i` must be lower than `j`. Static-static pairs are skipped. Support
/// flags from [`mark_supported`] decide whether the lower body of a vertical
/// contact is held in place.
pub fn resolve_pair(
    bodies: &mut [Body],
    i: usize,
    j: usize,
    has_floor: bool,
) -> Option<CollisionImpulse> {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];
    if a.is_immovable() && b.is_immovable() {
        return None;
    }

    let penetration = penetration(a, b)?;

    let impulse = CollisionImpulse::new(
        BodyHandle::new(i),
        BodyHandle::new(j),
        penetration.normal,
        penetration.contact,
    );

    // Vertical contacts: normal +y means `a` is below `b`
    let anchor = match penetration.normal.y {
        y if y > 0.0 && !b.is_immovable() && is_anchored(a, has_floor) => Some(i),
        y if y < 0.0 && !a.is_immovable() && is_anchored(b, has_floor) => Some(j),
        _ => None,
    };
    let push = penetration.normal * penetration.depth;
    match anchor {
        Some(anchor) if anchor == i => b.position += push,
        Some(_) => a.position -= push,
        None => separate(a, b, &penetration),
    }

    Some(match anchor {
        Some(anchor) => impulse.with_anchor(BodyHandle::new(anchor)),
        None => impulse,
    })
}
