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
//! Blow up a ring of crates next to a concrete wall
//!
//! Demonstrates radial impulses, static bodies, wind and the per-step
//! statistics returned by the world.

use glam::DVec3;
use sandbox_physics::{Body, CursorImpulse, Material, RadialImpulse, World, WorldConfig};

const DT: f64 = 1.0 / 120.0;

fn main() -> sandbox_physics::Result<()> {
    println!("Sandbox Physics - Explosion");
    println!("===========================\n");

    let config = WorldConfig {
        wind: DVec3::new(0.0, 0.0, 6.0),
        seed: 42,
        ..WorldConfig::default()
    };
    let mut world = World::with_standard_forces(config)?;

    let wall = world.add_body(
        Body::builder()
            .immovable()
            .size(DVec3::new(1.0, 3.0, 12.0))
            .position(DVec3::new(6.0, 1.5, 0.0))
            .material(Material::new(0.8, 0.6, 0.1, 1.05))
            .build()?,
    );

    let ring = 12;
    for i in 0..ring {
        let angle = i as f64 / ring as f64 * std::f64::consts::TAU;
        world.add_body(
            Body::builder()
                .mass(2.0 + (i % 3) as f64)
                .size(DVec3::new(0.8, 0.8, 0.8))
                .position(DVec3::new(angle.cos() * 3.0, 0.4, angle.sin() * 3.0))
                .bounciness(0.3)
                .build()?,
        );
    }
    println!("{} bodies, {} force generators", world.body_count(), world.force_generator_count());

    world.add_impulse(RadialImpulse::explosion(DVec3::new(0.0, 0.1, 0.0), 150.0, 4.0));

    let mut totals = (0, 0, 0);
    for step in 1..=360 {
        let stats = world.step(DT);
        totals.0 += stats.ground_contacts;
        totals.1 += stats.body_contacts;
        totals.2 += stats.bodies_impulsed;

        if step % 60 == 0 {
            println!(
                "t = {:4.1}s  kinetic energy {:9.2} J  ground contacts {:4}  body contacts {:3}",
                step as f64 * DT,
                world.kinetic_energy(),
                totals.0,
                totals.1
            );
        }

        // Nudge the first crate back towards the middle halfway through
        if step == 180 {
            if let Some(first) = world.handles().nth(1) {
                let point = world.body(first).map(|b| b.max()).unwrap_or_default();
                world.add_impulse(CursorImpulse::new(first, point, DVec3::NEG_X, 3.0));
            }
        }
    }

    println!("\n{} impulse responses delivered", totals.2);
    if let Some(wall) = world.body(wall) {
        println!("Wall still at {:?}", wall.position());
    }
    for handle in world.handles().skip(1).take(4) {
        if let Some(body) = world.body(handle) {
            let rotation = body.rotation();
            println!(
                "  {}: position {:6.2?}  rotation ({:5.1}, {:5.1}, {:5.1})",
                handle,
                body.position().to_array(),
                rotation.pitch,
                rotation.yaw,
                rotation.roll
            );
        }
    }

    Ok(())
}
