// Distributed under the GNU Affero General Public License v3.0 or later.
// See accompanying file LICENSE or https://www.gnu.org/licenses/agpl-3.0.html for details.

use glam::Vec3;

use crate::components::collidable_component::ShapeKind;
use crate::components::state_component::StateComponent;
use crate::physics::convex_hull::ConvexHull;
use crate::physics::simplex::{Simplex, SupportPoint};

const EXIT_ITERATION: usize = 1000;

/// One side of a narrow-phase query: the hull with the live transform and
/// shape tag needed to answer world-space support queries.
#[derive(Clone, Copy)]
pub struct SupportSource<'a> {
    pub hull: &'a ConvexHull,
    pub state: &'a StateComponent,
    pub shape: ShapeKind,
}

impl SupportSource<'_> {
    fn support_point(&self, direction: Vec3) -> Vec3 {
        self.hull
            .generate_support_point(direction, self.state, self.shape)
    }
}

/// Samples the Minkowski difference of the pair along `direction`.
pub(crate) fn generate_support(
    a: &SupportSource,
    b: &SupportSource,
    direction: Vec3,
) -> SupportPoint {
    let dir = direction.normalize_or_zero();
    let point_a = a.support_point(dir);
    let point_b = b.support_point(-dir);
    SupportPoint {
        v: point_a - point_b,
        a: point_a,
        b: point_b,
    }
}

/// GJK intersection test: true iff the Minkowski difference of the two
/// hulls contains the origin.
///
/// The simplex is built in place; a simplex retained from the previous
/// frame is continued rather than restarted, and on success it holds the
/// tetrahedron that contact generation expands. Exceeding the iteration cap
/// reports "no intersection" rather than failing.
pub fn are_intersecting(a: &SupportSource, b: &SupportSource, simplex: &mut Simplex) -> bool {
    let mut dir = Vec3::X;
    let mut sup = generate_support(a, b, dir);
    if sup.v.dot(dir).abs() >= sup.v.length() * 0.8 {
        // First sample landed almost along the probe axis; reseed along
        // another axis so the simplex does not start degenerate.
        dir = Vec3::Y;
        sup = generate_support(a, b, dir);
    }
    simplex.push(sup);
    dir = -simplex.a().v;

    for _ in 0..EXIT_ITERATION {
        let new_sup = generate_support(a, b, dir);
        if new_sup.v.dot(dir) < 0.0 {
            // The newest support point never crossed the origin; the
            // difference cannot contain it.
            return false;
        }
        simplex.push(new_sup);

        match simplex.len() {
            2 => {
                let ab = simplex.b().v - simplex.a().v;
                let ao = -simplex.a().v;
                dir = ab.cross(ao).cross(ab);
            }
            3 => {
                let (pa, pb, pc) = (simplex.a(), simplex.b(), simplex.c());
                let ab = pb.v - pa.v;
                let ac = pc.v - pa.v;
                let ao = -pa.v;
                let abc = ab.cross(ac);

                if points_toward_origin(simplex, ab.cross(abc)) {
                    simplex.set_line(pa, pb);
                    dir = ab.cross(ao).cross(ab);
                } else if points_toward_origin(simplex, abc.cross(ac)) {
                    simplex.set_line(pa, pc);
                    dir = ac.cross(ao).cross(ac);
                } else if points_toward_origin(simplex, abc) {
                    dir = abc;
                } else {
                    simplex.set_triangle(pa, pc, pb);
                    dir = -abc;
                }
            }
            _ => {
                let (pa, pb, pc, pd) = (simplex.a(), simplex.b(), simplex.c(), simplex.d());
                let ab = pb.v - pa.v;
                let ac = pc.v - pa.v;

                if points_toward_origin(simplex, ab.cross(ac)) {
                    face_check(simplex, &mut dir);
                    continue;
                }

                let ad = pd.v - pa.v;
                if points_toward_origin(simplex, ac.cross(ad)) {
                    simplex.set_triangle(pa, pc, pd);
                    face_check(simplex, &mut dir);
                    continue;
                }
                if points_toward_origin(simplex, ad.cross(ab)) {
                    simplex.set_triangle(pa, pd, pb);
                    face_check(simplex, &mut dir);
                    continue;
                }

                // Origin is behind all three faces incident to the newest
                // point: the tetrahedron encloses it.
                return true;
            }
        }
    }

    false
}

/// Shared reduction for the tetrahedron cases: the origin is outside one of
/// the faces, so fall back to the triangle tests against that face.
fn face_check(simplex: &mut Simplex, dir: &mut Vec3) {
    let (pa, pb, pc) = (simplex.a(), simplex.b(), simplex.c());
    let ab = pb.v - pa.v;
    let ac = pc.v - pa.v;
    let ao = -pa.v;
    let abc = ab.cross(ac);

    if points_toward_origin(simplex, ab.cross(abc)) {
        simplex.set_line(pa, pb);
        *dir = ab.cross(ao).cross(ab);
    } else if points_toward_origin(simplex, abc.cross(ac)) {
        simplex.set_line(pa, pc);
        *dir = ac.cross(ao).cross(ac);
    } else {
        simplex.set_triangle(pa, pb, pc);
        *dir = abc;
    }
}

fn points_toward_origin(simplex: &Simplex, v: Vec3) -> bool {
    v.dot(-simplex.a().v) > 0.0
}
