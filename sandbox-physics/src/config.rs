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
//! World configuration
//!
//! Environment parameters are passed explicitly when a world is created.
//! The default matches a clear Earth-like environment: standard gravity,
//! a grassy floor and sea-level air density.

use glam::DVec3;

use crate::error::ConfigError;

/// Highest supported restitution ceiling
pub const MAX_RESTITUTION: f64 = 1.5;

/// Environment parameters for a [`World`](crate::World)
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use sandbox_physics::WorldConfig;
///
/// let moon = WorldConfig {
///     gravity: -1.62,
///     air_density: 0.0,
///     ..WorldConfig::default()
/// };
/// assert!(moon.validate().is_ok());
///
/// let broken = WorldConfig { air_density: -1.0, ..WorldConfig::default() };
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Vertical gravitational acceleration (negative pulls down), m/s²
    pub gravity: f64,
    /// Default static friction of the floor
    pub floor_static_friction: f64,
    /// Default kinetic friction of the floor
    pub floor_kinetic_friction: f64,
    /// Air density used by drag and wind, kg/m³
    pub air_density: f64,
    /// Constant ambient wind velocity, m/s
    pub wind: DVec3,
    /// Whether the ground plane at y = 0 exists
    pub has_floor: bool,
    /// Upper bound applied to every restitution coefficient during resolution
    pub restitution_ceiling: f64,
    /// Seed for the random source used to pick impulse application points
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            gravity: -9.8,
            floor_static_friction: 0.6,
            floor_kinetic_friction: 0.4,
            air_density: 1.279,
            wind: DVec3::ZERO,
            has_floor: true,
            restitution_ceiling: 1.0,
            seed: 0x5eed,
        }
    }
}

impl WorldConfig {
    /// A floorless, airless configuration with only the given gravity
    ///
    /// Useful for isolated experiments where ground contact and aerodynamics
    /// would interfere.
    pub fn vacuum(gravity: f64) -> Self {
        WorldConfig {
            gravity,
            air_density: 0.0,
            has_floor: false,
            ..WorldConfig::default()
        }
    }

    /// Check every parameter
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for non-finite values, negative friction or
    /// density, or a restitution ceiling outside `[0, MAX_RESTITUTION]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if !self.wind.is_finite() {
            return Err(ConfigError::NonFinite("wind"));
        }

        for (name, value) in [
            ("floor static friction", self.floor_static_friction),
            ("floor kinetic friction", self.floor_kinetic_friction),
            ("air density", self.air_density),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if !(0.0..=MAX_RESTITUTION).contains(&self.restitution_ceiling) {
            return Err(ConfigError::RestitutionCeiling(self.restitution_ceiling));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.has_floor);
        assert_eq!(config.gravity, -9.8);
    }

    #[test]
    fn test_vacuum() {
        let config = WorldConfig::vacuum(-9.81);
        assert!(!config.has_floor);
        assert_eq!(config.air_density, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let config = WorldConfig {
            gravity: f64::NAN,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("gravity")));

        let config = WorldConfig {
            floor_kinetic_friction: -0.5,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { name: "floor kinetic friction", .. })
        ));

        let config = WorldConfig {
            restitution_ceiling: 2.0,
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RestitutionCeiling(2.0)));

        let config = WorldConfig {
            wind: DVec3::new(f64::INFINITY, 0.0, 0.0),
            ..WorldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("wind")));
    }
}
