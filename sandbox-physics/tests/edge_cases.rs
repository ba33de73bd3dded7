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
//! Edge case tests for construction, degenerate input and numerical safety

use glam::DVec3;
use sandbox_physics::{
    Body, BodyError, ConfigError, Drag, Falloff, ForceContext, ForceGenerator, PhysicsError,
    RadialImpulse, StepStats, Wind, World, WorldConfig,
};

#[test]
fn test_zero_mass_rejected() {
    let result = Body::builder().mass(0.0).build();
    assert_eq!(result.unwrap_err(), BodyError::InvalidMass(0.0));
}

#[test]
fn test_non_finite_parameters_rejected() {
    assert!(Body::builder().mass(f64::NAN).build().is_err());
    assert!(Body::builder().mass(f64::INFINITY).build().is_err());
    assert!(Body::builder().size(DVec3::new(1.0, f64::NAN, 1.0)).build().is_err());
    assert!(Body::builder().drag(f64::INFINITY).build().is_err());
    assert!(Body::builder().position(DVec3::splat(f64::NEG_INFINITY)).build().is_err());
}

#[test]
fn test_errors_convert_into_physics_error() {
    fn build_world(mass: f64) -> sandbox_physics::Result<World> {
        let mut world = World::new(WorldConfig::default())?;
        world.add_body(Body::builder().mass(mass).build()?);
        Ok(world)
    }

    assert!(build_world(1.0).is_ok());
    assert!(matches!(
        build_world(0.0),
        Err(PhysicsError::Body(BodyError::InvalidMass(_)))
    ));

    let config = WorldConfig {
        air_density: -1.0,
        ..WorldConfig::default()
    };
    assert!(matches!(World::new(config), Err(ConfigError::Negative { .. })));
}

#[test]
fn test_invalid_timesteps_are_ignored() {
    let mut world = World::with_standard_forces(WorldConfig::default()).unwrap();
    let handle = world.add_body(
        Body::builder()
            .position(DVec3::new(0.0, 4.0, 0.0))
            .velocity(DVec3::new(1.0, 0.0, 0.0))
            .build()
            .unwrap(),
    );
    let before = world.body(handle).unwrap().clone();

    for dt in [0.0, -1.0 / 60.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(world.step(dt), StepStats::default());
    }
    assert_eq!(world.body(handle).unwrap(), &before);
}

#[test]
fn test_drag_and_wind_at_rest_stay_finite() {
    let ctx = ForceContext::new(1.0 / 120.0, true);
    let mut body = Body::builder()
        .position(DVec3::new(0.0, 3.0, 0.0))
        .build()
        .unwrap();

    Drag::new(1.279).apply(&mut body, &ctx);
    Wind::new(1.279, DVec3::ZERO).apply(&mut body, &ctx);

    assert_eq!(body.acceleration(), DVec3::ZERO);
    assert!(body.acceleration().is_finite());
}

#[test]
fn test_aabb_overlap_is_symmetric() {
    let offsets = [
        DVec3::ZERO,
        DVec3::new(0.3, 0.0, 0.0),
        DVec3::new(0.5, 0.5, 0.5),
        DVec3::new(0.49, -0.2, 0.1),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, -3.0),
    ];
    let a = Body::builder().size(DVec3::splat(0.5)).build().unwrap();
    for offset in offsets {
        let b = Body::builder()
            .size(DVec3::new(0.5, 1.0, 0.25))
            .position(offset)
            .build()
            .unwrap();
        assert_eq!(a.is_colliding(&b), b.is_colliding(&a), "offset {offset:?}");
    }
}

#[test]
fn test_touching_faces_do_not_collide() {
    let a = Body::builder().size(DVec3::ONE).build().unwrap();
    let b = Body::builder()
        .size(DVec3::ONE)
        .position(DVec3::new(0.0, 1.0, 0.0))
        .build()
        .unwrap();
    assert!(!a.is_colliding(&b));
}

#[test]
fn test_torque_sign_from_offset_force() {
    let mut body = Body::builder().size(DVec3::ONE).build().unwrap();

    // Pushing the top face along +x tips the box about -z
    body.apply_force_at_point(DVec3::X, DVec3::new(0.0, 0.5, 0.0));
    assert!(body.torque().z < 0.0);
    assert_eq!(body.torque().x, 0.0);
    assert_eq!(body.torque().y, 0.0);

    let mut centered = Body::builder().size(DVec3::ONE).build().unwrap();
    centered.apply_force_at_point(DVec3::new(3.0, -2.0, 1.0), centered.position());
    assert_eq!(centered.torque(), DVec3::ZERO);
}

#[test]
fn test_explosion_at_body_center_stays_finite() {
    let mut world = World::new(WorldConfig::vacuum(0.0)).unwrap();
    let handle = world.add_body(
        Body::builder()
            .position(DVec3::new(1.0, 1.0, 1.0))
            .build()
            .unwrap(),
    );
    world.add_impulse(RadialImpulse::new(
        DVec3::new(1.0, 1.0, 1.0),
        100.0,
        2.0,
        Falloff::InverseSquare,
    ));
    world.step(1.0 / 120.0);

    let body = world.body(handle).unwrap();
    assert!(body.position().is_finite());
    assert!(body.velocity().is_finite());
}

#[test]
fn test_explosion_velocity_change_ignores_step_length() {
    let kick = |dt: f64| {
        let mut world = World::new(WorldConfig::vacuum(0.0)).unwrap();
        let handle = world.add_body(
            Body::builder()
                .size(DVec3::ONE)
                .position(DVec3::new(2.0, 3.0, 0.0))
                .build()
                .unwrap(),
        );
        world.add_impulse(RadialImpulse::explosion(DVec3::new(0.0, 3.0, 0.0), 5.0, 5.0));
        let stats = world.step(dt);
        assert_eq!(stats.bodies_impulsed, 1);
        world.body(handle).unwrap().velocity()
    };

    let coarse = kick(1.0 / 120.0);
    assert!(coarse.x > 0.0);
    assert_eq!(coarse, kick(1.0 / 240.0));
    assert_eq!(coarse, kick(0.001));
}

#[test]
fn test_custom_falloff_cannot_amplify() {
    fn runaway(_distance: f64, _radius: f64) -> f64 {
        1e12
    }

    let body = Body::builder()
        .position(DVec3::new(1.0, 0.0, 0.0))
        .build()
        .unwrap();
    let capped = RadialImpulse::new(DVec3::ZERO, 10.0, 1.0, Falloff::Custom(runaway));
    let full = RadialImpulse::new(DVec3::ZERO, 10.0, 1.0, Falloff::Constant);
    assert_eq!(capped.push_for(&body), full.push_for(&body));
}

#[test]
fn test_extreme_spin_is_damped_out() {
    let mut world = World::new(WorldConfig::vacuum(0.0)).unwrap();
    let handle = world.add_body(
        Body::builder()
            .angular_velocity(DVec3::new(50.0, -20.0, 5.0))
            .build()
            .unwrap(),
    );
    for _ in 0..2000 {
        world.step(1.0 / 120.0);
    }
    let body = world.body(handle).unwrap();
    assert_eq!(body.angular_velocity(), DVec3::ZERO);
    let rotation = body.rotation();
    for angle in [rotation.pitch, rotation.yaw, rotation.roll] {
        assert!((0.0..360.0).contains(&angle));
    }
}
