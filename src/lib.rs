// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

//! Real-time rigid-body collision detection and response.
//!
//! The pipeline runs two detection phases (bounding-box overlap, then exact
//! convex-hull intersection), extracts penetration contacts, and answers
//! them with impulse-derived forces on top of a semi-implicit Euler stepper
//! that can roll a frame back. Entity data lives in a `bevy_ecs` world; the
//! caller owns the frame loop and runs the physics schedule once per fixed
//! step.

pub mod components;
pub mod entity_factory;
pub mod gravity_resource;
pub mod physics;
pub mod settings;
pub mod time_resource;
mod utils;

use bevy_ecs::prelude::*;
use glam::Vec3;

pub use components::collidable_component::{CollidableComponent, ShapeKind};
pub use components::mass_component::MassComponent;
pub use components::mesh_component::{MeshComponent, MeshError};
pub use components::movable_component::MovableComponent;
pub use components::state_component::StateComponent;
pub use gravity_resource::Gravity;
pub use physics::collision_system::CollisionSystem;
pub use physics::dynamics_system::DynamicsSystem;
pub use physics::epa::ContactPoint;
pub use physics::integrator::{EulerIntegrator, StepHistory};
pub use physics::physics_resource::{Collision, CollisionFrameData};
pub use settings::{PhysicsSettings, SettingsError};
pub use time_resource::TimeResource;

/// Inserts every resource the physics schedule expects, configured from the
/// given settings.
pub fn init_physics_world(world: &mut World, settings: PhysicsSettings) {
    world.insert_resource(TimeResource::new(settings.fixed_time_step));
    world.insert_resource(Gravity::new(Vec3::NEG_Y, settings.gravity_magnitude));
    world.insert_resource(StepHistory::default());
    world.insert_resource(CollisionFrameData::default());
    world.insert_resource(settings);
}

/// One fixed simulation step: integration first, then collision handling.
pub fn build_physics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((DynamicsSystem::update, CollisionSystem::update).chain());
    schedule
}
