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
//! Rigid body model
//!
//! This module provides the simulated entity and its parts:
//! - Body state, force accumulation and integration
//! - Mass, material, orientation and inertia components
//! - Axis-aligned bounds recomputed from the current position
//! - Handles used by the world to address bodies

mod aabb;
mod components;
mod handle;
mod rigid_body;

pub use aabb::Aabb;
pub use components::{Inertia, Mass, Material, Rotation};
pub use handle::BodyHandle;
pub use rigid_body::{
    Body, BodyBuilder, ANGULAR_DAMPING, ANGULAR_REST_EPSILON, GROUND_CONTACT_TOLERANCE,
    RAD_TO_DEG, REST_SPEED,
};
