// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::collidable_component::CollidableComponent;
use crate::components::mass_component::MassComponent;
use crate::components::mesh_component::MeshComponent;
use crate::components::movable_component::MovableComponent;
use crate::components::state_component::StateComponent;
use crate::gravity_resource::Gravity;
use crate::physics::broad_phase;
use crate::physics::epa;
use crate::physics::gjk::{self, SupportSource};
use crate::physics::impulse::{ImpulseCalculator, Participant};
use crate::physics::integrator::{EulerIntegrator, StepHistory};
use crate::physics::physics_resource::{Collision, CollisionFrameData};
use crate::settings::PhysicsSettings;
use crate::time_resource::TimeResource;
use crate::utils::scope_timer::ScopeTimer;

/// Per-frame collision orchestrator.
///
/// Each update runs three phases in order: the broad phase prunes entity
/// pairs down to bounding-box overlaps, the narrow phase confirms them with
/// GJK (warm-started from last frame's simplex for the same pair), and the
/// resolve phase extracts a contact, rolls the participants back to their
/// pre-step state and applies response forces. Nothing survives a frame
/// except the simplex cache.
///
/// Pairs are processed in entity-creation order; when an entity collides in
/// several pairs the last resolved pair wins its final force and torque.
pub struct CollisionSystem;

impl CollisionSystem {
    pub fn update(
        mut query: Query<(
            Entity,
            &mut StateComponent,
            &MassComponent,
            &mut CollidableComponent,
            &MeshComponent,
            Option<&mut MovableComponent>,
        )>,
        malformed: Query<
            Entity,
            (
                With<CollidableComponent>,
                Or<(
                    Without<StateComponent>,
                    Without<MassComponent>,
                    Without<MeshComponent>,
                )>,
            ),
        >,
        mut frame: ResMut<CollisionFrameData>,
        history: Res<StepHistory>,
        settings: Res<PhysicsSettings>,
        gravity: Res<Gravity>,
        time: Res<TimeResource>,
    ) {
        if let Some(entity) = malformed.iter().next() {
            panic!("{entity:?} is collidable but is missing state, mass or mesh");
        }

        let _timer = ScopeTimer::new("collision pass");
        let dt = time.simulation_fixed_dt();

        let collisions = Self::broad_phase(&mut query, &mut frame, &settings);
        trace!("{} broad-phase candidates", collisions.len());

        let collisions = Self::narrow_phase(&mut query, collisions);
        let resolved = Self::resolve(&mut query, collisions, &history, &gravity, dt);
        trace!("{} collisions resolved", resolved.len());

        for collision in &resolved {
            frame
                .simplex_cache
                .insert(collision.a, collision.b, collision.simplex.clone());
        }
        frame.collisions = resolved;
    }

    /// Pairs every collidable entity with every later-created one, skips
    /// far-apart pairs, and keeps bounding-box overlaps as provisional
    /// collisions, adopting last frame's simplex when the pair repeats.
    fn broad_phase(
        query: &mut Query<(
            Entity,
            &mut StateComponent,
            &MassComponent,
            &mut CollidableComponent,
            &MeshComponent,
            Option<&mut MovableComponent>,
        )>,
        frame: &mut CollisionFrameData,
        settings: &PhysicsSettings,
    ) -> Vec<Collision> {
        let mut entities: Vec<Entity> = query.iter().map(|(entity, ..)| entity).collect();
        entities.sort_unstable_by_key(|entity| entity.to_bits());

        let mut collisions = Vec::new();
        for i in 0..entities.len() {
            for j in i + 1..entities.len() {
                let [item_a, item_b] = query
                    .get_many_mut([entities[i], entities[j]])
                    .expect("collidable entity disappeared during the broad phase");
                let (entity_a, state_a, _, mut collidable_a, mesh_a, movable_a) = item_a;
                let (entity_b, state_b, _, mut collidable_b, mesh_b, _) = item_b;

                if state_a.position.distance(state_b.position)
                    >= settings.broad_phase_cull_distance
                {
                    continue;
                }

                if !broad_phase::are_intersecting(
                    &mut collidable_a,
                    &state_a,
                    mesh_a,
                    &mut collidable_b,
                    &state_b,
                    mesh_b,
                ) {
                    continue;
                }

                let mut collision = Collision::new(entity_a, entity_b, movable_a.is_some());
                if let Some(simplex) = frame.simplex_cache.get(entity_a, entity_b) {
                    collision.simplex = simplex.clone();
                }
                collisions.push(collision);
            }
        }

        frame.simplex_cache.clear();
        collisions
    }

    /// Confirms provisional collisions with GJK; failures drop out.
    fn narrow_phase(
        query: &mut Query<(
            Entity,
            &mut StateComponent,
            &MassComponent,
            &mut CollidableComponent,
            &MeshComponent,
            Option<&mut MovableComponent>,
        )>,
        mut collisions: Vec<Collision>,
    ) -> Vec<Collision> {
        collisions.retain_mut(|collision| {
            let [item_a, item_b] = query
                .get_many_mut([collision.a, collision.b])
                .expect("collidable entity disappeared during the narrow phase");
            let (_, state_a, _, collidable_a, _, _) = item_a;
            let (_, state_b, _, collidable_b, _, _) = item_b;

            let source_a = SupportSource {
                hull: &collidable_a.hull,
                state: &*state_a,
                shape: collidable_a.shape,
            };
            let source_b = SupportSource {
                hull: &collidable_b.hull,
                state: &*state_b,
                shape: collidable_b.shape,
            };
            gjk::are_intersecting(&source_a, &source_b, &mut collision.simplex)
        });
        collisions
    }

    /// Extracts a contact per confirmed collision, rolls the participants
    /// back to their pre-step state and applies the response forces.
    fn resolve(
        query: &mut Query<(
            Entity,
            &mut StateComponent,
            &MassComponent,
            &mut CollidableComponent,
            &MeshComponent,
            Option<&mut MovableComponent>,
        )>,
        collisions: Vec<Collision>,
        history: &StepHistory,
        gravity: &Gravity,
        dt: f32,
    ) -> Vec<Collision> {
        let mut resolved = Vec::new();
        for mut collision in collisions {
            let [item_a, item_b] = query
                .get_many_mut([collision.a, collision.b])
                .expect("collidable entity disappeared during resolution");
            let (_, mut state_a, mass_a, collidable_a, _, mut movable_a) = item_a;
            let (_, mut state_b, mass_b, collidable_b, _, mut movable_b) = item_b;

            let contact = {
                let source_a = SupportSource {
                    hull: &collidable_a.hull,
                    state: &*state_a,
                    shape: collidable_a.shape,
                };
                let source_b = SupportSource {
                    hull: &collidable_b.hull,
                    state: &*state_b,
                    shape: collidable_b.shape,
                };
                epa::generate_contact(&source_a, &source_b, &collision.simplex)
            };
            let Some(mut contact) = contact else {
                debug!(
                    "no contact between {:?} and {:?}; collision dropped this frame",
                    collision.a, collision.b
                );
                continue;
            };

            // Undo this frame's naive integration before responding.
            if let Some(movable) = movable_a.as_deref_mut() {
                EulerIntegrator::step_back(history, collision.a, &mut state_a, movable);
            }
            if let Some(movable) = movable_b.as_deref_mut() {
                EulerIntegrator::step_back(history, collision.b, &mut state_b, movable);
            }

            ImpulseCalculator::calculate(
                &mut contact,
                Participant {
                    state: &*state_a,
                    mass: mass_a,
                    collidable: &*collidable_a,
                    movable: movable_a.as_deref_mut(),
                },
                Participant {
                    state: &*state_b,
                    mass: mass_b,
                    collidable: &*collidable_b,
                    movable: movable_b.as_deref_mut(),
                },
                gravity,
                dt,
            );

            collision.contact = Some(contact);
            resolved.push(collision);
        }
        resolved
    }
}
