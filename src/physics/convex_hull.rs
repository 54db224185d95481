// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::Vec3;

use crate::components::collidable_component::ShapeKind;
use crate::components::mesh_component::MeshComponent;
use crate::components::state_component::{euler_rotation_quat, transform_matrix, StateComponent};

/// Support-point structure built once per entity from its local mesh.
///
/// Vertices are deduplicated by exact coordinate equality and each one
/// records the neighbors it shares a triangle edge with, so support queries
/// can hill-climb along the adjacency instead of scanning every vertex.
#[derive(Debug, Clone)]
pub struct ConvexHull {
    vertices: Vec<HullVertex>,
}

#[derive(Debug, Clone)]
struct HullVertex {
    position: Vec3,
    adjacent: Vec<usize>,
}

impl ConvexHull {
    pub fn new(mesh: &MeshComponent) -> Self {
        let mut vertices: Vec<HullVertex> = Vec::new();
        let mut remap = Vec::with_capacity(mesh.positions.len());
        for &position in &mesh.positions {
            let key = position_bits(position);
            match vertices
                .iter()
                .position(|vertex| position_bits(vertex.position) == key)
            {
                Some(existing) => remap.push(existing),
                None => {
                    remap.push(vertices.len());
                    vertices.push(HullVertex {
                        position,
                        adjacent: Vec::new(),
                    });
                }
            }
        }

        for triangle in mesh.indices.chunks_exact(3) {
            let a = remap[triangle[0] as usize];
            let b = remap[triangle[1] as usize];
            let c = remap[triangle[2] as usize];
            add_adjacent(&mut vertices, a, b);
            add_adjacent(&mut vertices, a, c);
            add_adjacent(&mut vertices, b, a);
            add_adjacent(&mut vertices, b, c);
            add_adjacent(&mut vertices, c, a);
            add_adjacent(&mut vertices, c, b);
        }

        Self { vertices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the world-space point of the hull farthest along `direction`.
    ///
    /// The query direction is brought into hull-local space by the inverse
    /// of the entity rotation, the farthest local vertex is found by hill
    /// climbing, and the winner is pushed through the full world transform.
    /// Box rotations are first snapped into the 45/90 degree buckets the
    /// search was tuned with; balls skip the rotation entirely.
    pub fn generate_support_point(
        &self,
        direction: Vec3,
        state: &StateComponent,
        shape: ShapeKind,
    ) -> Vec3 {
        let mut rotation = state.rotation;
        let mut dir = direction;
        if shape != ShapeKind::Ball {
            if shape != ShapeKind::Plane {
                rotation = bucket_rotation(rotation);
            }
            dir = euler_rotation_quat(rotation).inverse() * dir;
            dir = dir.normalize_or_zero();
        }

        let local = self.hill_climb(dir);
        transform_matrix(state.position, rotation, state.scale).transform_point3(local)
    }

    /// Walks the adjacency toward a strictly larger dot product until a
    /// local maximum is reached; global for a convex vertex set. Ties go to
    /// the first maximal neighbor found.
    fn hill_climb(&self, direction: Vec3) -> Vec3 {
        let mut start = 0;
        loop {
            let mut current = start;
            let mut distance = self.vertices[current].position.dot(direction);
            for &neighbor in &self.vertices[start].adjacent {
                let candidate = self.vertices[neighbor].position.dot(direction);
                if candidate > distance {
                    current = neighbor;
                    distance = candidate;
                }
            }
            if current == start {
                return self.vertices[start].position;
            }
            start = current;
        }
    }
}

fn add_adjacent(vertices: &mut [HullVertex], vertex: usize, neighbor: usize) {
    if vertex == neighbor {
        return;
    }
    let adjacent = &mut vertices[vertex].adjacent;
    if !adjacent.contains(&neighbor) {
        adjacent.push(neighbor);
    }
}

fn position_bits(position: Vec3) -> [u32; 3] {
    [
        position.x.to_bits(),
        position.y.to_bits(),
        position.z.to_bits(),
    ]
}

fn bucket_rotation(rotation: Vec3) -> Vec3 {
    Vec3::new(
        bucket_axis(rotation.x),
        bucket_axis(rotation.y),
        bucket_axis(rotation.z),
    )
}

/// Snaps one Euler angle into the 45/90 degree buckets used by the support
/// search: right-angle multiples collapse to zero, odd multiples of 45 to
/// -45, and anything past 45 degrees is folded back toward the first octant.
fn bucket_axis(mut angle: f32) -> f32 {
    if angle > 0.0 {
        angle = -angle;
    }
    if angle % 45.0 == 0.0 && (angle / 45.0) % 2.0 != 0.0 {
        angle = -45.0;
    }
    if angle % 45.0 == 0.0 && (angle / 45.0) % 2.0 == 0.0 {
        angle = 0.0;
    } else if angle < -45.0 {
        angle = 45.0 - (angle % 90.0);
    }
    if angle > 0.0 {
        angle = -angle;
    }
    angle
}
