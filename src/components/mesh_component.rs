use bevy_ecs::component::Component;
use glam::Vec3;
use std::f32::consts::PI;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    NoVertices,

    #[error("index count {0} is not a multiple of three")]
    NotTriangles(usize),

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Local-space vertex positions and a triangle index list.
///
/// Consumed once when the convex hull is built and every frame by the broad
/// phase to refresh the world bounding box.
#[derive(Component, Debug, Clone)]
pub struct MeshComponent {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshComponent {
    /// Wraps externally supplied mesh data, validating it up front so the
    /// collision structures built from it never have to.
    pub fn from_raw(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if positions.is_empty() {
            return Err(MeshError::NoVertices);
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles(indices.len()));
        }
        for &index in &indices {
            if index as usize >= positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count: positions.len(),
                });
            }
        }
        Ok(Self { positions, indices })
    }

    /// Axis-aligned cube of side one, centered on the origin.
    pub fn unit_cube() -> Self {
        let positions = vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];
        let indices = vec![
            0, 3, 2, 0, 2, 1, // back
            4, 5, 6, 4, 6, 7, // front
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
            0, 1, 5, 0, 5, 4, // bottom
            3, 7, 6, 3, 6, 2, // top
        ];
        Self { positions, indices }
    }

    /// Sphere of diameter one, centered on the origin, built from latitude
    /// rings and longitude sectors.
    pub fn uv_sphere(stacks: u32, sectors: u32) -> Self {
        let radius = 0.5;
        let mut positions = vec![Vec3::new(0.0, radius, 0.0)];
        for stack in 1..stacks {
            let phi = PI * stack as f32 / stacks as f32;
            let y = radius * phi.cos();
            let ring = radius * phi.sin();
            for sector in 0..sectors {
                let theta = 2.0 * PI * sector as f32 / sectors as f32;
                positions.push(Vec3::new(ring * theta.cos(), y, ring * theta.sin()));
            }
        }
        positions.push(Vec3::new(0.0, -radius, 0.0));
        let bottom = positions.len() as u32 - 1;

        let ring_start = |stack: u32| 1 + (stack - 1) * sectors;
        let mut indices = Vec::new();
        for sector in 0..sectors {
            let next = (sector + 1) % sectors;
            indices.extend_from_slice(&[0, ring_start(1) + next, ring_start(1) + sector]);
        }
        for stack in 1..stacks - 1 {
            for sector in 0..sectors {
                let next = (sector + 1) % sectors;
                let upper = ring_start(stack);
                let lower = ring_start(stack + 1);
                indices.extend_from_slice(&[upper + sector, upper + next, lower + next]);
                indices.extend_from_slice(&[upper + sector, lower + next, lower + sector]);
            }
        }
        let last_ring = ring_start(stacks - 1);
        for sector in 0..sectors {
            let next = (sector + 1) % sectors;
            indices.extend_from_slice(&[last_ring + sector, last_ring + next, bottom]);
        }

        Self { positions, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
