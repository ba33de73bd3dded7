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
//! Ground plane at `y = 0`

use glam::DVec3;

use crate::body::{Body, REST_SPEED};

/// Resolve a body sinking through the ground plane
///
/// A body whose bottom face is below `y = 0` is lifted back onto the plane.
/// Fast impacts reflect the vertical velocity scaled by the body's bounciness
/// (capped at `restitution_ceiling`). Slow impacts bring the body fully to
/// rest, including any spin.
///
/// Returns `true` when the body was in contact. Static bodies are never
/// touched.
pub fn resolve_ground(body: &mut Body, restitution_ceiling: f64) -> bool {
    if body.is_immovable() || body.min().y >= 0.0 {
        return false;
    }

    body.position.y = body.size.y * 0.5;

    if body.velocity.y.abs() > REST_SPEED {
        let restitution = body.material.bounciness.min(restitution_ceiling);
        body.velocity.y = -body.velocity.y * restitution;
    } else {
        body.velocity = DVec3::ZERO;
        body.acceleration = DVec3::ZERO;
        body.angular_velocity = DVec3::ZERO;
        body.angular_acceleration = DVec3::ZERO;
        body.torque = DVec3::ZERO;
    }
    true
}
