use glam::Vec3;

/// A sample of the Minkowski difference: the difference value itself plus
/// the two raw world-space hull support points that produced it, kept so
/// contact generation can interpolate real surface points later.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupportPoint {
    pub v: Vec3,
    pub a: Vec3,
    pub b: Vec3,
}

/// The GJK working set: up to four support points forming a point, segment,
/// triangle or tetrahedron. The newest point is always `a`; pushing onto a
/// full simplex drops the oldest point off the end.
#[derive(Debug, Clone, Default)]
pub struct Simplex {
    points: [SupportPoint; 4],
    len: usize,
}

impl Simplex {
    pub fn push(&mut self, point: SupportPoint) {
        self.points.rotate_right(1);
        self.points[0] = point;
        self.len = (self.len + 1).min(4);
    }

    pub fn set_line(&mut self, a: SupportPoint, b: SupportPoint) {
        self.points[0] = a;
        self.points[1] = b;
        self.len = 2;
    }

    pub fn set_triangle(&mut self, a: SupportPoint, b: SupportPoint, c: SupportPoint) {
        self.points[0] = a;
        self.points[1] = b;
        self.points[2] = c;
        self.len = 3;
    }

    pub fn set_tetrahedron(
        &mut self,
        a: SupportPoint,
        b: SupportPoint,
        c: SupportPoint,
        d: SupportPoint,
    ) {
        self.points = [a, b, c, d];
        self.len = 4;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn a(&self) -> SupportPoint {
        debug_assert!(self.len >= 1);
        self.points[0]
    }

    pub fn b(&self) -> SupportPoint {
        debug_assert!(self.len >= 2);
        self.points[1]
    }

    pub fn c(&self) -> SupportPoint {
        debug_assert!(self.len >= 3);
        self.points[2]
    }

    pub fn d(&self) -> SupportPoint {
        debug_assert!(self.len >= 4);
        self.points[3]
    }
}
