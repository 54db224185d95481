use crate::components::collidable_component::CollidableComponent;
use crate::components::mesh_component::MeshComponent;
use crate::components::state_component::StateComponent;

/// Refreshes an entity's world bounding box from its live transform.
pub fn update_bounding_box(
    collidable: &mut CollidableComponent,
    state: &StateComponent,
    mesh: &MeshComponent,
) {
    let matrix = state.to_mat4();
    collidable.bounding_box.update(
        mesh.positions
            .iter()
            .map(|position| matrix.transform_point3(*position)),
    );
}

/// Bounding-box overlap test for a candidate pair. Both boxes are refreshed
/// from the current transforms first so the test never sees stale bounds.
pub fn are_intersecting(
    collidable_a: &mut CollidableComponent,
    state_a: &StateComponent,
    mesh_a: &MeshComponent,
    collidable_b: &mut CollidableComponent,
    state_b: &StateComponent,
    mesh_b: &MeshComponent,
) -> bool {
    update_bounding_box(collidable_a, state_a, mesh_a);
    update_bounding_box(collidable_b, state_b, mesh_b);
    collidable_a
        .bounding_box
        .is_intersecting(&collidable_b.bounding_box)
}
