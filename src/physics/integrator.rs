use bevy_ecs::prelude::*;
use glam::Vec3;
use std::collections::HashMap;

use crate::components::mass_component::MassComponent;
use crate::components::movable_component::MovableComponent;
use crate::components::state_component::StateComponent;

/// The dynamic fields of a body as they were before the most recent
/// integration step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodySnapshot {
    pub force: Vec3,
    pub momentum: Vec3,
    pub velocity: Vec3,
    pub torque: Vec3,
    pub angular_momentum: Vec3,
    pub angular_velocity: Vec3,
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Rollback history owned by the integrator: one previous-step snapshot per
/// entity, overwritten on every integrate call.
#[derive(Resource, Default)]
pub struct StepHistory {
    previous: HashMap<Entity, BodySnapshot>,
}

impl StepHistory {
    fn record(&mut self, entity: Entity, state: &StateComponent, movable: &MovableComponent) {
        self.previous.insert(
            entity,
            BodySnapshot {
                force: movable.force,
                momentum: movable.momentum,
                velocity: movable.velocity,
                torque: movable.torque,
                angular_momentum: movable.angular_momentum,
                angular_velocity: movable.angular_velocity,
                position: state.position,
                rotation: state.rotation,
            },
        );
    }

    pub fn previous(&self, entity: Entity) -> Option<&BodySnapshot> {
        self.previous.get(&entity)
    }

    pub fn forget(&mut self, entity: Entity) {
        self.previous.remove(&entity);
    }
}

/// Semi-implicit Euler stepper with single-step rollback.
pub struct EulerIntegrator;

impl EulerIntegrator {
    /// Advances one body by `dt`, snapshotting it first so the step can be
    /// undone. Momentum integrates from force before velocity and position
    /// are derived from it.
    pub fn integrate(
        history: &mut StepHistory,
        entity: Entity,
        state: &mut StateComponent,
        movable: &mut MovableComponent,
        mass: &MassComponent,
        dt: f32,
    ) {
        history.record(entity, state, movable);

        movable.momentum += movable.force * dt;
        movable.velocity = movable.momentum * mass.inverse_mass;
        state.position += movable.velocity * dt;

        movable.angular_momentum = movable.torque * dt;
        movable.angular_velocity = movable.angular_momentum * mass.inverse_inertia;
        state.rotation += to_degrees(movable.angular_velocity) * dt;
    }

    /// Restores the body to its pre-integration snapshot, negating the
    /// retained torque. Used to undo a frame's naive integration once a
    /// real contact has been confirmed, before response forces are applied.
    /// The snapshot itself is left untouched.
    pub fn step_back(
        history: &StepHistory,
        entity: Entity,
        state: &mut StateComponent,
        movable: &mut MovableComponent,
    ) {
        let previous = history
            .previous(entity)
            .expect("step_back on an entity that was never integrated");

        movable.force = previous.force;
        movable.momentum = previous.momentum;
        movable.velocity = previous.velocity;
        movable.torque = -previous.torque;
        movable.angular_momentum = previous.angular_momentum;
        movable.angular_velocity = previous.angular_velocity;
        state.position = previous.position;
        state.rotation = previous.rotation;
    }
}

fn to_degrees(v: Vec3) -> Vec3 {
    Vec3::new(v.x.to_degrees(), v.y.to_degrees(), v.z.to_degrees())
}
