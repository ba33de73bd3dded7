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
//! Error types
//!
//! The error surface is intentionally narrow: the simulation itself never
//! fails once running. Errors are only produced when constructing bodies or
//! worlds from invalid parameters, or when validating a timestep.

use thiserror::Error;

/// Errors raised while constructing a [`Body`](crate::Body)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    /// Mass was zero, NaN or infinite
    #[error("invalid mass {0}: must be non-zero and finite (negative marks a static body)")]
    InvalidMass(f64),

    /// A size component was non-positive or not finite
    #[error("invalid size [{x}, {y}, {z}]: every extent must be positive and finite")]
    InvalidSize {
        /// X extent
        x: f64,
        /// Y extent
        y: f64,
        /// Z extent
        z: f64,
    },

    /// A material coefficient was negative or not finite
    #[error("invalid {name} coefficient {value}: must be non-negative and finite")]
    InvalidCoefficient {
        /// Name of the offending coefficient
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// An inertia factor was non-positive or not finite
    #[error("invalid inertia factor {value} on {axis} axis: must be positive and finite")]
    InvalidInertia {
        /// Axis label
        axis: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Initial kinematic state contained NaN or infinite components
    #[error("initial {0} must be finite")]
    NonFiniteState(&'static str),
}

/// Errors raised while validating a [`WorldConfig`](crate::WorldConfig)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A parameter was NaN or infinite
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    /// A parameter that must be non-negative was negative
    #[error("{name} must be non-negative, got {value}")]
    Negative {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The restitution ceiling was outside the supported range
    #[error("restitution ceiling {0} is outside [0, {max}]", max = crate::config::MAX_RESTITUTION)]
    RestitutionCeiling(f64),
}

/// Top-level error type for the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Invalid body construction
    #[error(transparent)]
    Body(#[from] BodyError),

    /// Invalid world configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Step duration was non-positive or not finite
    #[error("invalid timestep {0}: must be positive and finite")]
    InvalidTimestep(f64),
}

/// Result alias using [`PhysicsError`]
pub type Result<T> = std::result::Result<T, PhysicsError>;
