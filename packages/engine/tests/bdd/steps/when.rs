//! When step definitions
//!
//! Steps that execute actions (suite runs).

use cucumber::when;

use crate::world::VerslagWorld;

#[when("the suite is run")]
fn run_suite(world: &mut VerslagWorld) {
    world.run_suite();
}
