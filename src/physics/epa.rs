// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::Vec3;
use log::debug;

use crate::physics::gjk::{generate_support, SupportSource};
use crate::physics::simplex::{Simplex, SupportPoint};

const EXIT_THRESHOLD: f32 = 0.001;
const ITERATION_LIMIT: usize = 50;

/// Where, which way, and how deep two bodies interpenetrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub world_point: Vec3,
    pub world_normal: Vec3,
    pub penetration_depth: f32,
}

#[derive(Debug, Clone, Copy)]
struct PolytopeFace {
    a: SupportPoint,
    b: SupportPoint,
    c: SupportPoint,
    normal: Vec3,
}

impl PolytopeFace {
    fn new(a: SupportPoint, b: SupportPoint, c: SupportPoint) -> Self {
        let normal = (b.v - a.v).cross(c.v - a.v).normalize_or_zero();
        Self { a, b, c, normal }
    }

    fn distance_to_origin(&self) -> f32 {
        self.normal.dot(self.a.v).abs()
    }
}

/// Expands the terminating GJK tetrahedron until the closest polytope face
/// lies on the Minkowski-difference boundary, then reads the contact off
/// that face.
///
/// `None` means the expansion failed to converge (or the polytope went
/// degenerate); the caller drops the collision for this frame and retries
/// from fresh state on the next one.
pub fn generate_contact(
    a: &SupportSource,
    b: &SupportSource,
    simplex: &Simplex,
) -> Option<ContactPoint> {
    if simplex.len() != 4 {
        return None;
    }

    let mut faces = vec![
        PolytopeFace::new(simplex.a(), simplex.b(), simplex.c()),
        PolytopeFace::new(simplex.a(), simplex.c(), simplex.d()),
        PolytopeFace::new(simplex.a(), simplex.d(), simplex.b()),
        PolytopeFace::new(simplex.b(), simplex.d(), simplex.c()),
    ];
    let mut edges: Vec<(SupportPoint, SupportPoint)> = Vec::new();

    for _ in 0..ITERATION_LIMIT {
        let closest = *faces.iter().min_by(|left, right| {
            left.distance_to_origin()
                .total_cmp(&right.distance_to_origin())
        })?;
        let current_distance = closest.distance_to_origin();

        let support = generate_support(a, b, closest.normal);
        if closest.normal.dot(support.v) - current_distance < EXIT_THRESHOLD {
            // No meaningful expansion left along the closest face; this is
            // the contact face.
            return build_contact(&closest);
        }

        // Remove every face visible from the new point, keeping the
        // silhouette: edges shared by a removed and a surviving face cancel
        // their doubled entries.
        faces.retain(|face| {
            let visible = face.normal.dot(support.v - face.a.v) > 0.0;
            if visible {
                process_edge(&mut edges, face.a, face.b);
                process_edge(&mut edges, face.b, face.c);
                process_edge(&mut edges, face.c, face.a);
            }
            !visible
        });

        for (edge_a, edge_b) in edges.drain(..) {
            faces.push(PolytopeFace::new(support, edge_a, edge_b));
        }

        if faces.is_empty() {
            debug!("polytope lost every face during expansion");
            return None;
        }
    }

    debug!("contact expansion hit the iteration cap");
    None
}

/// Cancels opposite-direction duplicates so only silhouette edges remain.
fn process_edge(
    edges: &mut Vec<(SupportPoint, SupportPoint)>,
    a: SupportPoint,
    b: SupportPoint,
) {
    if let Some(index) = edges
        .iter()
        .position(|(edge_a, edge_b)| *edge_a == b && *edge_b == a)
    {
        edges.remove(index);
    } else {
        edges.push((a, b));
    }
}

fn build_contact(face: &PolytopeFace) -> Option<ContactPoint> {
    let distance_from_origin = face.normal.dot(face.a.v);
    let weights = barycentric(
        face.normal * distance_from_origin,
        face.a.v,
        face.b.v,
        face.c.v,
    );
    if !weights.iter().all(|weight| weight.is_finite()) {
        debug!("degenerate contact face, no contact produced");
        return None;
    }

    // Interpolate the first body's raw support points, not the Minkowski
    // difference, to land on its actual surface.
    let world_point = face.a.a * weights[0] + face.b.a * weights[1] + face.c.a * weights[2];
    Some(ContactPoint {
        world_point,
        world_normal: -face.normal,
        penetration_depth: face.normal.dot(face.a.v).abs(),
    })
}

/// Barycentric coordinates of `p` projected onto triangle `abc`, after
/// Ericson's Real-Time Collision Detection.
pub(crate) fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> [f32; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;

    let weight_b = (d11 * d20 - d01 * d21) / denom;
    let weight_c = (d00 * d21 - d01 * d20) / denom;
    [1.0 - weight_b - weight_c, weight_b, weight_c]
}
