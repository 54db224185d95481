use bevy_ecs::component::Component;

use crate::components::mesh_component::MeshComponent;
use crate::components::state_component::StateComponent;
use crate::physics::bounding_box::BoundingBox;
use crate::physics::convex_hull::ConvexHull;

/// Coarse shape classification consulted by the support-point search and by
/// collision response, in place of inspecting concrete entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Any blocky convex mesh; support queries bucket its rotation.
    Box,
    /// Rotationally symmetric; support queries skip the rotation and the
    /// response multiplies torque to approximate rolling.
    Ball,
    /// Flat immovable surface; support queries use the raw rotation.
    Plane,
}

/// Everything the collision pipeline keeps per entity: the world-space
/// bounding box (refreshed every frame), the convex hull (built once), the
/// material coefficients and the shape tag.
#[derive(Component, Debug, Clone)]
pub struct CollidableComponent {
    pub bounding_box: BoundingBox,
    pub hull: ConvexHull,
    pub restitution: f32,
    pub friction: f32,
    pub shape: ShapeKind,
}

impl CollidableComponent {
    pub fn new(
        mesh: &MeshComponent,
        state: &StateComponent,
        restitution: f32,
        friction: f32,
        shape: ShapeKind,
    ) -> Self {
        let matrix = state.to_mat4();
        let bounding_box = BoundingBox::from_vertices(
            mesh.positions
                .iter()
                .map(|position| matrix.transform_point3(*position)),
        );
        Self {
            bounding_box,
            hull: ConvexHull::new(mesh),
            restitution,
            friction,
            shape,
        }
    }
}
