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
//! Rigid cuboid bodies
//!
//! A [`Body`] carries its own kinematic state, shape and material. Forces
//! and torques are accumulated during a step and consumed by
//! [`Body::integrate`] and [`Body::integrate_rotation`], which clear the
//! accumulators afterwards.
//!
//! # Integration
//!
//! Linear motion uses semi-implicit (symplectic) Euler:
//!
//! ```text
//! v' = v + a*dt
//! p' = p + v'*dt
//! ```
//!
//! Rotation tracks three independent Euler angles in degrees driven by an
//! angular velocity in rad/s. A fixed damping factor is applied every step
//! and residual spin below a small epsilon is snapped to zero.

use glam::DVec3;
use tracing::{debug, warn};

use super::aabb::Aabb;
use super::components::{Inertia, Mass, Material, Rotation};
use crate::error::BodyError;

/// Multiplicative damping applied to angular velocity every step
pub const ANGULAR_DAMPING: f64 = 0.98;

/// Degrees per radian
pub const RAD_TO_DEG: f64 = 57.2958;

/// Angular speed (rad/s) below which rotation is snapped to rest
pub const ANGULAR_REST_EPSILON: f64 = 1e-3;

/// Vertical speed below which a grounded body is considered at rest
pub const REST_SPEED: f64 = 0.1;

/// Distance from the ground plane still counted as ground contact
pub const GROUND_CONTACT_TOLERANCE: f64 = 1e-3;

/// A simulated rigid cuboid
///
/// Build bodies with [`Body::builder`]:
///
/// ```
/// use glam::DVec3;
/// use sandbox_physics::Body;
///
/// let crate_box = Body::builder()
///     .mass(4.0)
///     .size(DVec3::new(1.0, 1.0, 1.0))
///     .position(DVec3::new(0.0, 3.0, 0.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(crate_box.min().y, 2.5);
/// assert_eq!(crate_box.max().y, 3.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) position: DVec3,
    pub(crate) velocity: DVec3,
    pub(crate) acceleration: DVec3,
    pub(crate) rotation: Rotation,
    pub(crate) angular_velocity: DVec3,
    pub(crate) angular_acceleration: DVec3,
    pub(crate) torque: DVec3,
    pub(crate) size: DVec3,
    pub(crate) mass: Mass,
    pub(crate) material: Material,
    pub(crate) inertia: Inertia,
    pub(crate) supported: bool,
}

impl Body {
    /// Start building a body with default parameters
    pub fn builder() -> BodyBuilder {
        BodyBuilder::default()
    }

    /// Create a body at the origin with the given mass and size and default material
    pub fn new(mass: f64, size: DVec3) -> Result<Self, BodyError> {
        BodyBuilder::default().mass(mass).size(size).build()
    }

    /// Center position
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Move the body (caller-driven placement, bypasses physics)
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// Linear velocity
    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Overwrite the linear velocity
    pub fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    /// Acceleration accumulated so far this step
    pub fn acceleration(&self) -> DVec3 {
        self.acceleration
    }

    /// Euler orientation in degrees
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Overwrite the orientation
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Angular velocity in rad/s
    pub fn angular_velocity(&self) -> DVec3 {
        self.angular_velocity
    }

    /// Overwrite the angular velocity
    pub fn set_angular_velocity(&mut self, angular_velocity: DVec3) {
        self.angular_velocity = angular_velocity;
    }

    /// Angular acceleration computed by the last rotation step
    pub fn angular_acceleration(&self) -> DVec3 {
        self.angular_acceleration
    }

    /// Torque accumulated so far this step
    pub fn torque(&self) -> DVec3 {
        self.torque
    }

    /// Full extents
    pub fn size(&self) -> DVec3 {
        self.size
    }

    /// Mass
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Material coefficients
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Diagonal inertia factors
    pub fn inertia(&self) -> Inertia {
        self.inertia
    }

    /// Check whether this body is static
    pub fn is_immovable(&self) -> bool {
        self.mass.is_immovable()
    }

    /// Check whether the body came to rest on top of another body in the
    /// last collision sweep
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Lowest corner of the axis-aligned bounds
    pub fn min(&self) -> DVec3 {
        self.position - self.size * 0.5
    }

    /// Highest corner of the axis-aligned bounds
    pub fn max(&self) -> DVec3 {
        self.position + self.size * 0.5
    }

    /// Axis-aligned bounds recomputed from the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }

    /// Accumulate a force through the center of mass
    ///
    /// `acceleration += force / mass`. Static bodies ignore forces.
    pub fn apply_force(&mut self, force: DVec3) {
        if self.is_immovable() {
            debug!("Ignoring force {:?} on static body", force);
            return;
        }
        self.acceleration += force * self.mass.inverse();
    }

    /// Accumulate a raw torque
    pub fn apply_torque(&mut self, torque: DVec3) {
        if self.is_immovable() {
            return;
        }
        self.torque += torque;
    }

    /// Accumulate a force applied at a world-space point
    ///
    /// The lever arm `r = point - position` contributes `r × force` to the
    /// torque accumulator, and the force is also applied linearly.
    pub fn apply_force_at_point(&mut self, force: DVec3, point: DVec3) {
        if self.is_immovable() {
            debug!("Ignoring off-center force {:?} on static body", force);
            return;
        }
        let lever_arm = point - self.position;
        self.torque += lever_arm.cross(force);
        self.apply_force(force);
    }

    /// Change the momentum instantly by `impulse` (N·s) through the center of mass
    ///
    /// `velocity += impulse / mass`, independent of the step length. Static
    /// bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: DVec3) {
        if self.is_immovable() {
            debug!("Ignoring impulse {:?} on static body", impulse);
            return;
        }
        let velocity = self.velocity + impulse * self.mass.inverse();
        if !velocity.is_finite() {
            warn!("Rejected non-finite impulse {:?}, keeping velocity", impulse);
            return;
        }
        self.velocity = velocity;
    }

    /// Apply an impulse at a world-space point
    ///
    /// The angular impulse `r × impulse` changes the angular velocity by
    /// `(r × impulse) / (m · I)`, the same scaling torque gets in
    /// [`integrate_rotation`](Self::integrate_rotation).
    pub fn apply_impulse_at_point(&mut self, impulse: DVec3, point: DVec3) {
        if self.is_immovable() {
            debug!("Ignoring off-center impulse {:?} on static body", impulse);
            return;
        }
        let lever_arm = point - self.position;
        let spin = lever_arm.cross(impulse) / (self.inertia.as_vec() * self.mass.value());
        if spin.is_finite() {
            self.angular_velocity += spin;
        }
        self.apply_impulse(impulse);
    }

    /// Reset every motion accumulator and velocity
    pub fn clear_forces(&mut self) {
        self.acceleration = DVec3::ZERO;
        self.velocity = DVec3::ZERO;
        self.torque = DVec3::ZERO;
        self.angular_velocity = DVec3::ZERO;
        self.angular_acceleration = DVec3::ZERO;
    }

    /// Advance linear motion by `dt` using semi-implicit Euler
    ///
    /// Returns `false` without touching velocity or position when the body is
    /// static or the result would not be finite. The acceleration accumulator
    /// is cleared in every case.
    pub fn integrate(&mut self, dt: f64) -> bool {
        if self.is_immovable() {
            self.acceleration = DVec3::ZERO;
            return false;
        }

        let velocity = self.velocity + self.acceleration * dt;
        let position = self.position + velocity * dt;
        self.acceleration = DVec3::ZERO;

        if !velocity.is_finite() || !position.is_finite() {
            warn!(
                "Rejected non-finite integration result for body at {:?}, keeping previous state",
                self.position
            );
            return false;
        }

        self.velocity = velocity;
        self.position = position;
        true
    }

    /// Advance rotation by `dt`
    ///
    /// Converts torque into angular acceleration, applies damping, accumulates
    /// the Euler angles in degrees and snaps residual spin to zero. Torque is
    /// always cleared.
    pub fn integrate_rotation(&mut self, dt: f64) {
        if self.is_immovable() {
            self.torque = DVec3::ZERO;
            return;
        }

        let divisor = self.inertia.as_vec() * self.mass.value();
        let angular_acceleration = self.torque / divisor;
        let angular_velocity =
            (self.angular_velocity + angular_acceleration * dt) * ANGULAR_DAMPING;

        if !angular_velocity.is_finite() {
            warn!("Rejected non-finite angular velocity, stopping rotation");
            self.angular_velocity = DVec3::ZERO;
            self.angular_acceleration = DVec3::ZERO;
            self.torque = DVec3::ZERO;
            return;
        }

        self.angular_acceleration = angular_acceleration;
        self.angular_velocity = angular_velocity;
        self.rotation.advance(angular_velocity * dt * RAD_TO_DEG);

        if self.angular_velocity.length() < ANGULAR_REST_EPSILON {
            self.angular_velocity = DVec3::ZERO;
            self.angular_acceleration = DVec3::ZERO;
        }

        self.torque = DVec3::ZERO;
    }

    /// Strict AABB overlap test
    pub fn is_colliding(&self, other: &Body) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    /// Check whether the body sits on the ground plane without vertical motion
    pub fn is_resting_on_ground(&self) -> bool {
        self.min().y <= GROUND_CONTACT_TOLERANCE && self.velocity.y.abs() <= REST_SPEED
    }

    /// Check whether the body is in contact with (or below) the ground plane
    pub fn is_on_ground(&self) -> bool {
        self.position.y <= self.size.y * 0.5
    }

    /// Kinetic energy `½·m·|v|²` (zero for static bodies)
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_immovable() {
            return 0.0;
        }
        0.5 * self.mass.value() * self.velocity.length_squared()
    }

    /// Linear momentum `m·v` (zero for static bodies)
    pub fn momentum(&self) -> DVec3 {
        if self.is_immovable() {
            return DVec3::ZERO;
        }
        self.velocity * self.mass.value()
    }
}

/// Builder for [`Body`] with validation at `build` time
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    mass: f64,
    size: DVec3,
    position: DVec3,
    velocity: DVec3,
    rotation: Rotation,
    angular_velocity: DVec3,
    material: Material,
    inertia: Inertia,
}

impl Default for BodyBuilder {
    fn default() -> Self {
        BodyBuilder {
            mass: 1.0,
            size: DVec3::splat(0.5),
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            rotation: Rotation::zero(),
            angular_velocity: DVec3::ZERO,
            material: Material::default(),
            inertia: Inertia::default(),
        }
    }
}

impl BodyBuilder {
    /// Mass in kilograms (negative for a static body)
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Make the body static
    pub fn immovable(mut self) -> Self {
        self.mass = Mass::immovable().value();
        self
    }

    /// Full extents
    pub fn size(mut self, size: DVec3) -> Self {
        self.size = size;
        self
    }

    /// Initial center position
    pub fn position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Initial linear velocity
    pub fn velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Initial orientation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Initial angular velocity in rad/s
    pub fn angular_velocity(mut self, angular_velocity: DVec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Full material
    pub fn material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Static and kinetic friction coefficients
    pub fn friction(mut self, static_friction: f64, kinetic_friction: f64) -> Self {
        self.material.static_friction = static_friction;
        self.material.kinetic_friction = kinetic_friction;
        self
    }

    /// Coefficient of restitution
    pub fn bounciness(mut self, bounciness: f64) -> Self {
        self.material.bounciness = bounciness;
        self
    }

    /// Drag coefficient
    pub fn drag(mut self, drag: f64) -> Self {
        self.material.drag = drag;
        self
    }

    /// Diagonal inertia factors
    pub fn inertia(mut self, inertia: Inertia) -> Self {
        self.inertia = inertia;
        self
    }

    /// Validate parameters and create the body
    ///
    /// # Errors
    ///
    /// Returns a [`BodyError`] for zero or non-finite mass, non-positive size,
    /// negative coefficients, non-positive inertia, or non-finite initial state.
    pub fn build(self) -> Result<Body, BodyError> {
        let mass = Mass::try_new(self.mass).ok_or(BodyError::InvalidMass(self.mass))?;

        let size_valid = self.size.is_finite() && self.size.min_element() > 0.0;
        if !size_valid {
            return Err(BodyError::InvalidSize {
                x: self.size.x,
                y: self.size.y,
                z: self.size.z,
            });
        }

        let mut material = self.material;
        for (name, value) in [
            ("static friction", material.static_friction),
            ("kinetic friction", material.kinetic_friction),
            ("bounciness", material.bounciness),
            ("drag", material.drag),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BodyError::InvalidCoefficient { name, value });
            }
        }
        if material.bounciness > Material::MAX_BOUNCINESS {
            warn!(
                "Clamping bounciness {} to {}",
                material.bounciness,
                Material::MAX_BOUNCINESS
            );
            material.bounciness = Material::MAX_BOUNCINESS;
        }

        for (axis, value) in [
            ("x", self.inertia.xx),
            ("y", self.inertia.yy),
            ("z", self.inertia.zz),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(BodyError::InvalidInertia { axis, value });
            }
        }

        if !self.position.is_finite() {
            return Err(BodyError::NonFiniteState("position"));
        }
        if !self.velocity.is_finite() {
            return Err(BodyError::NonFiniteState("velocity"));
        }
        if !self.angular_velocity.is_finite() {
            return Err(BodyError::NonFiniteState("angular velocity"));
        }

        // Static bodies never move
        let (velocity, angular_velocity) = if mass.is_immovable() {
            (DVec3::ZERO, DVec3::ZERO)
        } else {
            (self.velocity, self.angular_velocity)
        };

        Ok(Body {
            position: self.position,
            velocity,
            acceleration: DVec3::ZERO,
            rotation: self.rotation,
            angular_velocity,
            angular_acceleration: DVec3::ZERO,
            torque: DVec3::ZERO,
            size: self.size,
            mass,
            material,
            inertia: self.inertia,
            supported: false,
        })
    }
}
