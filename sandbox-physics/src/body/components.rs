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
//! Body state components
//!
//! Value types that make up a [`Body`](super::Body): mass, material
//! coefficients, Euler orientation and the diagonal inertia approximation.
//! Vectors use double-precision `glam` types throughout.

use glam::DVec3;

/// Mass of a body in kilograms
///
/// A negative mass marks a static (immovable) body that behaves as if it
/// had infinite mass. Zero mass is never valid.
///
/// # Examples
///
/// ```
/// use sandbox_physics::body::Mass;
///
/// let mass = Mass::new(2.0);
/// assert_eq!(mass.inverse(), 0.5);
/// assert!(!mass.is_immovable());
///
/// let wall = Mass::immovable();
/// assert!(wall.is_immovable());
/// assert_eq!(wall.inverse(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is zero, NaN or infinite. For fallible construction,
    /// use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(value != 0.0 && value.is_finite(), "Mass must be non-zero and finite");
        Mass { value }
    }

    /// Try to create a new mass
    ///
    /// Returns `None` if the value is zero, NaN or infinite.
    pub fn try_new(value: f64) -> Option<Self> {
        if value != 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Create a static mass (treated as infinite)
    pub fn immovable() -> Self {
        Mass { value: -1.0 }
    }

    /// Get the raw mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Check if this is a static body
    pub fn is_immovable(&self) -> bool {
        self.value < 0.0
    }

    /// Get the inverse mass (1/m)
    ///
    /// Returns 0.0 for static bodies.
    pub fn inverse(&self) -> f64 {
        if self.is_immovable() {
            0.0
        } else {
            1.0 / self.value
        }
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::new(1.0)
    }
}

/// Surface and aerodynamic coefficients of a body
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Resistance to the onset of sliding
    pub static_friction: f64,
    /// Resistance while sliding
    pub kinetic_friction: f64,
    /// Coefficient of restitution (0 = inelastic, 1 = elastic)
    pub bounciness: f64,
    /// Dimensionless drag coefficient
    pub drag: f64,
}

impl Material {
    /// Highest bounciness accepted at construction ("super bouncy" presets)
    pub const MAX_BOUNCINESS: f64 = 1.5;

    /// Create a material from its four coefficients
    pub fn new(static_friction: f64, kinetic_friction: f64, bounciness: f64, drag: f64) -> Self {
        Material {
            static_friction,
            kinetic_friction,
            bounciness,
            drag,
        }
    }

    /// A frictionless, perfectly inelastic material with no drag
    pub fn frictionless() -> Self {
        Material::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::new(0.3, 0.2, 0.0, 1.05)
    }
}

/// Euler orientation in degrees
///
/// Angles accumulate independently and wrap into `[0, 360)`. Orientation is
/// only used for rendering and cross-section computation; collision always
/// uses axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    /// Rotation about the X axis
    pub pitch: f64,
    /// Rotation about the Y axis
    pub yaw: f64,
    /// Rotation about the Z axis
    pub roll: f64,
}

impl Rotation {
    /// Create a rotation from angles in degrees (wrapped into `[0, 360)`)
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Rotation {
            pitch: wrap_degrees(pitch),
            yaw: wrap_degrees(yaw),
            roll: wrap_degrees(roll),
        }
    }

    /// Identity orientation
    pub fn zero() -> Self {
        Rotation::default()
    }

    /// Advance by per-axis increments in degrees
    pub fn advance(&mut self, delta: DVec3) {
        self.pitch = wrap_degrees(self.pitch + delta.x);
        self.yaw = wrap_degrees(self.yaw + delta.y);
        self.roll = wrap_degrees(self.roll + delta.z);
    }

    /// Angles in radians as (pitch, yaw, roll)
    pub fn to_radians(&self) -> DVec3 {
        DVec3::new(self.pitch, self.yaw, self.roll) * (std::f64::consts::PI / 180.0)
    }

    /// Check whether pitch and roll are within `tolerance` degrees of level
    pub fn is_level(&self, tolerance: f64) -> bool {
        angular_distance(self.pitch) <= tolerance && angular_distance(self.roll) <= tolerance
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn angular_distance(angle: f64) -> f64 {
    angle.min(360.0 - angle)
}

/// Diagonal moment-of-inertia factors, one per axis
///
/// These are dimensionless shape factors multiplied by the body's mass when
/// converting torque into angular acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inertia {
    /// Factor about the X axis
    pub xx: f64,
    /// Factor about the Y axis
    pub yy: f64,
    /// Factor about the Z axis
    pub zz: f64,
}

impl Inertia {
    /// Create inertia factors
    pub fn new(xx: f64, yy: f64, zz: f64) -> Self {
        Inertia { xx, yy, zz }
    }

    /// The same factor on every axis
    pub fn uniform(factor: f64) -> Self {
        Inertia::new(factor, factor, factor)
    }

    /// Factors as a vector
    pub fn as_vec(&self) -> DVec3 {
        DVec3::new(self.xx, self.yy, self.zz)
    }
}

impl Default for Inertia {
    fn default() -> Self {
        Inertia::uniform(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_creation() {
        let mass = Mass::new(10.5);
        assert_eq!(mass.value(), 10.5);
        assert!(!mass.is_immovable());
    }

    #[test]
    fn test_mass_try_new() {
        assert!(Mass::try_new(1.0).is_some());
        assert!(Mass::try_new(-3.0).is_some());
        assert!(Mass::try_new(0.0).is_none());
        assert!(Mass::try_new(f64::NAN).is_none());
        assert!(Mass::try_new(f64::INFINITY).is_none());
    }

    #[test]
    #[should_panic(expected = "Mass must be non-zero and finite")]
    fn test_mass_zero_panics() {
        Mass::new(0.0);
    }

    #[test]
    fn test_negative_mass_is_immovable() {
        let mass = Mass::new(-5.0);
        assert!(mass.is_immovable());
        assert_eq!(mass.inverse(), 0.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let rotation = Rotation::new(370.0, -10.0, 720.0);
        assert!((rotation.pitch - 10.0).abs() < 1e-12);
        assert!((rotation.yaw - 350.0).abs() < 1e-12);
        assert_eq!(rotation.roll, 0.0);
    }

    #[test]
    fn test_rotation_advance_and_level() {
        let mut rotation = Rotation::zero();
        rotation.advance(DVec3::new(-1.0, 90.0, 0.5));
        assert!((rotation.pitch - 359.0).abs() < 1e-12);
        assert!(rotation.is_level(2.0));
        assert!(!rotation.is_level(0.25));
    }

    #[test]
    fn test_component_defaults() {
        assert_eq!(Mass::default().value(), 1.0);
        assert_eq!(Inertia::default().as_vec(), DVec3::ONE);
        let material = Material::default();
        assert!(material.static_friction >= material.kinetic_friction);
    }
}
