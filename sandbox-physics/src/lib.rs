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
//! # Sandbox Physics
//!
//! A real-time rigid-body physics engine for 3D sandbox worlds: boxes fall,
//! bounce, slide, get blown around by wind and knocked over by explosions.
//! The aim is game-grade plausibility, not exact rigid-body mechanics.
//!
//! ## Features
//!
//! - **Rigid cuboids**: mass, extents, material and per-axis inertia
//! - **Continuous forces**: gravity, static/kinetic ground friction, drag and wind
//! - **Impulses**: explosions, cursor pushes and collision responses, each applied once
//! - **Collision**: AABB overlap with least-penetration separation and a ground plane
//! - **Parallelization**: optional Rayon integration for the per-body phases
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use sandbox_physics::{Body, RadialImpulse, World, WorldConfig};
//!
//! let mut world = World::with_standard_forces(WorldConfig::default()).unwrap();
//! let crate_box = world.add_body(
//!     Body::builder()
//!         .mass(10.0)
//!         .size(DVec3::ONE)
//!         .position(DVec3::new(0.0, 5.0, 0.0))
//!         .bounciness(0.3)
//!         .build()
//!         .unwrap(),
//! );
//!
//! world.add_impulse(RadialImpulse::explosion(DVec3::new(-2.0, 5.0, 0.0), 500.0, 4.0));
//! for _ in 0..120 {
//!     world.step(1.0 / 120.0);
//! }
//!
//! assert!(world.body(crate_box).unwrap().position().x > 0.0);
//! ```

#![warn(missing_docs)]

/// Rigid bodies and their components
pub mod body;

/// Collision detection and resolution
pub mod collision;

/// World configuration
pub mod config;

/// Error types
pub mod error;

/// Continuous force generators
pub mod forces;

/// One-shot impulse generators
pub mod impulses;

/// Numerical integration methods
pub mod integration;

/// The simulation world
pub mod world;

pub use body::{Aabb, Body, BodyBuilder, BodyHandle, Inertia, Mass, Material, Rotation};
pub use config::WorldConfig;
pub use error::{BodyError, ConfigError, PhysicsError, Result};
pub use forces::{Drag, ForceContext, ForceGenerator, Friction, Gravity, Wind};
pub use impulses::{
    CollisionImpulse, CursorImpulse, Falloff, Impulse, ImpulseContext, RadialImpulse,
};
pub use world::{StepStats, World};
