use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use crate::components::collidable_component::{CollidableComponent, ShapeKind};
use crate::components::mass_component::MassComponent;
use crate::components::mesh_component::MeshComponent;
use crate::components::movable_component::MovableComponent;
use crate::components::state_component::StateComponent;
use crate::gravity_resource::Gravity;

/// Free factory functions that attach a fixed component set to a plain
/// entity handle. Behavior downstream is driven entirely by which
/// components are present, never by what kind of thing was spawned.

/// A dynamic cube that falls, collides and responds.
pub fn spawn_movable_box(
    world: &mut World,
    position: Vec3,
    rotation: Vec3,
    scale: f32,
    mass: f32,
    restitution: f32,
    friction: f32,
) -> Entity {
    let mesh = MeshComponent::unit_cube();
    let state = StateComponent {
        position,
        rotation,
        scale: Vec3::splat(scale),
    };
    let mut mass_component = MassComponent::new(mass);
    mass_component.set_inertia(mass * scale * scale / 6.0);
    let collidable = CollidableComponent::new(&mesh, &state, restitution, friction, ShapeKind::Box);
    let movable = MovableComponent {
        force: initial_gravity_force(world, mass),
        ..Default::default()
    };
    world
        .spawn((state, mass_component, collidable, mesh, movable))
        .id()
}

/// A cube that collides but never moves.
pub fn spawn_fixed_box(
    world: &mut World,
    position: Vec3,
    rotation: Vec3,
    scale: f32,
    restitution: f32,
    friction: f32,
) -> Entity {
    let mesh = MeshComponent::unit_cube();
    let state = StateComponent {
        position,
        rotation,
        scale: Vec3::splat(scale),
    };
    let mass_component = MassComponent::new(f32::INFINITY);
    let collidable = CollidableComponent::new(&mesh, &state, restitution, friction, ShapeKind::Box);
    world.spawn((state, mass_component, collidable, mesh)).id()
}

/// A dynamic sphere; rolls rather than slides on contact.
pub fn spawn_movable_ball(
    world: &mut World,
    position: Vec3,
    rotation: Vec3,
    scale: f32,
    mass: f32,
    restitution: f32,
    friction: f32,
) -> Entity {
    let mesh = MeshComponent::uv_sphere(12, 18);
    let state = StateComponent {
        position,
        rotation,
        scale: Vec3::splat(scale),
    };
    let mut mass_component = MassComponent::new(mass);
    let radius = 0.5 * scale;
    mass_component.set_inertia(0.4 * mass * radius * radius);
    let collidable = CollidableComponent::new(&mesh, &state, restitution, friction, ShapeKind::Ball);
    let movable = MovableComponent {
        force: initial_gravity_force(world, mass),
        ..Default::default()
    };
    world
        .spawn((state, mass_component, collidable, mesh, movable))
        .id()
}

/// An immovable surface of the given extent: a cube mesh flattened to zero
/// height, so the hull and bounding box are genuinely two-dimensional.
pub fn spawn_fixed_plane(
    world: &mut World,
    position: Vec3,
    rotation: Vec3,
    extent: Vec2,
    restitution: f32,
    friction: f32,
) -> Entity {
    let mesh = MeshComponent::unit_cube();
    let state = StateComponent {
        position,
        rotation,
        scale: Vec3::new(extent.x, 0.0, extent.y),
    };
    let mass_component = MassComponent::new(f32::INFINITY);
    let collidable =
        CollidableComponent::new(&mesh, &state, restitution, friction, ShapeKind::Plane);
    world.spawn((state, mass_component, collidable, mesh)).id()
}

fn initial_gravity_force(world: &World, mass: f32) -> Vec3 {
    let gravity = world
        .get_resource::<Gravity>()
        .copied()
        .unwrap_or_default();
    gravity.gravity_vector() * mass
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn movable_box_carries_the_full_component_set() {
        let mut world = World::new();
        let entity = spawn_movable_box(&mut world, Vec3::Y, Vec3::ZERO, 2.0, 3.0, 0.5, 0.1);

        let mass = world.get::<MassComponent>(entity).unwrap();
        assert_approx_eq!(mass.inertia, 3.0 * 4.0 / 6.0, 1e-6);
        let movable = world.get::<MovableComponent>(entity).unwrap();
        assert_approx_eq!(movable.force.y, -9.81 * 3.0, 1e-4);
        assert!(world.get::<CollidableComponent>(entity).is_some());
        assert!(world.get::<MeshComponent>(entity).is_some());
        assert_eq!(world.get::<StateComponent>(entity).unwrap().scale, Vec3::splat(2.0));
    }

    #[test]
    fn fixed_plane_is_immovable_and_flat() {
        let mut world = World::new();
        let entity = spawn_fixed_plane(
            &mut world,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec2::new(4.0, 6.0),
            1.0,
            0.0,
        );

        assert!(world.get::<MovableComponent>(entity).is_none());
        let mass = world.get::<MassComponent>(entity).unwrap();
        assert!(mass.is_immovable());
        assert_eq!(mass.inverse_inertia, 0.0);
        let collidable = world.get::<CollidableComponent>(entity).unwrap();
        assert_eq!(collidable.shape, ShapeKind::Plane);
        assert_eq!(collidable.bounding_box.min.y, 0.0);
        assert_eq!(collidable.bounding_box.max.y, 0.0);
        assert_eq!(collidable.bounding_box.max.x, 2.0);
        assert_eq!(collidable.bounding_box.max.z, 3.0);
    }

    #[test]
    fn ball_uses_solid_sphere_inertia() {
        let mut world = World::new();
        let entity = spawn_movable_ball(&mut world, Vec3::ZERO, Vec3::ZERO, 2.0, 5.0, 0.8, 0.3);
        let mass = world.get::<MassComponent>(entity).unwrap();
        assert_approx_eq!(mass.inertia, 0.4 * 5.0 * 1.0, 1e-6);
        let collidable = world.get::<CollidableComponent>(entity).unwrap();
        assert_eq!(collidable.shape, ShapeKind::Ball);
    }

    #[test]
    fn spawned_force_respects_a_custom_gravity_resource() {
        let mut world = World::new();
        world.insert_resource(Gravity::new(Vec3::NEG_Y, 1.62));
        let entity = spawn_movable_box(&mut world, Vec3::ZERO, Vec3::ZERO, 1.0, 2.0, 0.5, 0.0);
        let movable = world.get::<MovableComponent>(entity).unwrap();
        assert_approx_eq!(movable.force.y, -1.62 * 2.0, 1e-5);
    }
}
