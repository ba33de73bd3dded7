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
//! Projected cross-sectional area of an oriented cuboid
//!
//! # Algorithm
//!
//! 1. Rotate the 8 corners of the body into world space using its Euler
//!    orientation (XYZ order).
//! 2. Project every corner onto an orthonormal basis `(u, w)` spanning the
//!    plane perpendicular to the flow direction.
//! 3. Build the 2D convex hull with Andrew's monotone chain.
//! 4. Measure the hull with the shoelace formula.
//!
//! # References
//!
//! - Andrew, A. M. (1979). "Another efficient algorithm for convex hulls in
//!   two dimensions". Information Processing Letters, 9(5), 216-219.

use glam::{DQuat, DVec2, DVec3, EulerRot};

use crate::body::Body;

/// Flow speeds below this are treated as no flow
const MIN_FLOW_SPEED: f64 = 1e-9;

/// Area of the body's silhouette on the plane perpendicular to `flow`
///
/// Returns 0.0 when `flow` has (near) zero length.
pub fn cross_sectional_area(body: &Body, flow: DVec3) -> f64 {
    if flow.length() < MIN_FLOW_SPEED {
        return 0.0;
    }
    let direction = flow.normalize();
    let (u, w) = direction.any_orthonormal_pair();

    let angles = body.rotation().to_radians();
    let orientation = DQuat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
    let half = body.size() * 0.5;

    let mut projected = Vec::with_capacity(8);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                let corner = orientation * (half * DVec3::new(sx, sy, sz));
                projected.push(DVec2::new(corner.dot(u), corner.dot(w)));
            }
        }
    }

    polygon_area(&convex_hull(projected))
}

/// Convex hull of a 2D point set in counter-clockwise order
///
/// Collinear points on the hull boundary are dropped.
pub fn convex_hull(mut points: Vec<DVec2>) -> Vec<DVec2> {
    if points.len() < 3 {
        return points;
    }
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut hull: Vec<DVec2> = Vec::with_capacity(points.len() * 2);

    // Lower hull
    for &point in &points {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], point) <= 0.0 {
            hull.pop();
        }
        hull.push(point);
    }

    // Upper hull
    let lower_len = hull.len() + 1;
    for &point in points.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && turn(hull[hull.len() - 2], hull[hull.len() - 1], point) <= 0.0
        {
            hull.pop();
        }
        hull.push(point);
    }

    // Last point repeats the first
    hull.pop();
    hull
}

/// Area of a simple polygon via the shoelace formula
pub fn polygon_area(vertices: &[DVec2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice_area.abs() * 0.5
}

fn turn(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    (a - o).perp_dot(b - o)
}
