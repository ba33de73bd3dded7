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
//! Drop three crates with different bounciness and watch them settle
//!
//! Prints the height of each crate every quarter second until everything
//! comes to rest on the ground.

use glam::DVec3;
use sandbox_physics::{Body, World, WorldConfig};

const DT: f64 = 1.0 / 120.0;

fn main() -> sandbox_physics::Result<()> {
    println!("Sandbox Physics - Drop and Bounce");
    println!("=================================\n");

    let mut world = World::with_standard_forces(WorldConfig::default())?;

    let mut crates = Vec::new();
    for (i, bounciness) in [0.2, 0.5, 0.8].into_iter().enumerate() {
        let body = Body::builder()
            .mass(5.0)
            .size(DVec3::ONE)
            .position(DVec3::new(i as f64 * 3.0, 5.5, 0.0))
            .bounciness(bounciness)
            .build()?;
        crates.push((bounciness, world.add_body(body)));
    }

    println!("Dropping {} crates from 5 m\n", crates.len());

    let mut elapsed = 0.0;
    for step in 1..=1200 {
        world.step(DT);
        elapsed += DT;

        if step % 30 == 0 {
            let heights: Vec<String> = crates
                .iter()
                .filter_map(|(_, handle)| world.body(*handle))
                .map(|body| format!("{:6.3}", body.min().y))
                .collect();
            println!("t = {:5.2}s  heights: {}", elapsed, heights.join("  "));
        }

        let settled = world
            .bodies()
            .iter()
            .all(|body| body.is_resting_on_ground() && body.velocity() == DVec3::ZERO);
        if settled {
            println!("\nAll crates at rest after {:.2}s", elapsed);
            break;
        }
    }

    for (bounciness, handle) in &crates {
        if let Some(body) = world.body(*handle) {
            println!(
                "  bounciness {:.1}: resting at y = {:.3}",
                bounciness,
                body.position().y
            );
        }
    }

    Ok(())
}
