use glam::Vec3;

/// Axis-aligned bounding box in world space. Two boxes whose intervals
/// overlap on all three axes are candidates for the narrow phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }
}

impl BoundingBox {
    pub fn from_vertices<I>(world_vertices: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut bounds = Self::default();
        bounds.update(world_vertices);
        bounds
    }

    /// Recomputes the bounds with a single min/max scan. Called every frame
    /// per broad-phase candidate with the current world-space vertices.
    pub fn update<I>(&mut self, world_vertices: I)
    where
        I: IntoIterator<Item = Vec3>,
    {
        self.min = Vec3::INFINITY;
        self.max = Vec3::NEG_INFINITY;
        for vertex in world_vertices {
            self.min = self.min.min(vertex);
            self.max = self.max.max(vertex);
        }
    }

    /// Inclusive interval-overlap test on all three axes.
    pub fn is_intersecting(&self, other: &BoundingBox) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> BoundingBox {
        BoundingBox {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    #[test]
    fn update_scans_min_and_max() {
        let mut bounds = BoundingBox::default();
        bounds.update([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
        ]);
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn intersection_is_symmetric() {
        let boxes = [
            unit_box_at(Vec3::ZERO),
            unit_box_at(Vec3::new(0.7, 0.0, 0.0)),
            unit_box_at(Vec3::new(0.0, 2.0, 0.0)),
            unit_box_at(Vec3::new(-0.3, 0.4, 0.9)),
            unit_box_at(Vec3::splat(5.0)),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.is_intersecting(b), b.is_intersecting(a));
            }
        }
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = unit_box_at(Vec3::ZERO);
        let b = unit_box_at(Vec3::new(1.0, 0.0, 0.0));
        assert!(a.is_intersecting(&b));
    }

    #[test]
    fn separation_threshold_on_one_axis() {
        let a = unit_box_at(Vec3::ZERO);
        let apart = unit_box_at(Vec3::new(1.00001, 0.0, 0.0));
        let overlapping = unit_box_at(Vec3::new(0.99999, 0.0, 0.0));
        assert!(!a.is_intersecting(&apart));
        assert!(a.is_intersecting(&overlapping));
    }

    #[test]
    fn empty_vertex_set_intersects_nothing() {
        let empty = BoundingBox::default();
        let unit = unit_box_at(Vec3::ZERO);
        assert!(!empty.is_intersecting(&unit));
    }
}
