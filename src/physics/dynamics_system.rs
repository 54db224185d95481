use bevy_ecs::prelude::*;

use crate::components::mass_component::MassComponent;
use crate::components::movable_component::MovableComponent;
use crate::components::state_component::StateComponent;
use crate::gravity_resource::Gravity;
use crate::physics::integrator::{EulerIntegrator, StepHistory};
use crate::time_resource::TimeResource;

/// Moves every movable body one fixed step and reapplies gravity.
///
/// The gravity force written here is what the next step integrates unless
/// collision response overwrites it first.
pub struct DynamicsSystem;

impl DynamicsSystem {
    pub fn update(
        mut query: Query<(
            Entity,
            &mut StateComponent,
            &mut MovableComponent,
            &MassComponent,
        )>,
        mut history: ResMut<StepHistory>,
        mut time: ResMut<TimeResource>,
        gravity: Res<Gravity>,
    ) {
        time.advance_frame();
        let dt = time.simulation_fixed_dt();

        for (entity, mut state, mut movable, mass) in query.iter_mut() {
            EulerIntegrator::integrate(&mut history, entity, &mut state, &mut movable, mass, dt);
            movable.force = gravity.gravity_vector() * mass.mass;
        }
    }
}
