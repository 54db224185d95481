use bevy_ecs::prelude::*;

use crate::physics::epa::ContactPoint;
use crate::physics::simplex::Simplex;

/// A candidate or resolved collision between two entities. Side `a` is the
/// movable entity whenever only one side is movable, so the response pass
/// never has to re-derive which body can react.
#[derive(Debug, Clone)]
pub struct Collision {
    pub a: Entity,
    pub b: Entity,
    pub simplex: Simplex,
    pub contact: Option<ContactPoint>,
}

impl Collision {
    pub fn new(a: Entity, b: Entity, a_movable: bool) -> Self {
        let (a, b) = if a_movable { (a, b) } else { (b, a) };
        Self {
            a,
            b,
            simplex: Simplex::default(),
            contact: None,
        }
    }

    /// True when this collision is between the same unordered entity pair.
    pub fn involves(&self, a: Entity, b: Entity) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// Simplexes of the collisions resolved last frame, keyed by unordered
/// entity pair, used to warm-start this frame's narrow phase.
#[derive(Debug, Default)]
pub struct SimplexCache(Vec<(Entity, Entity, Simplex)>);

impl SimplexCache {
    pub fn get(&self, a: Entity, b: Entity) -> Option<&Simplex> {
        self.0
            .iter()
            .find(|(cached_a, cached_b, _)| {
                (*cached_a == a && *cached_b == b) || (*cached_a == b && *cached_b == a)
            })
            .map(|(_, _, simplex)| simplex)
    }

    pub fn insert(&mut self, a: Entity, b: Entity, simplex: Simplex) {
        self.0.push((a, b, simplex));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-frame output of the collision system plus the cross-frame warm-start
/// cache. Collisions not re-confirmed in a frame are discarded with it.
#[derive(Resource, Default)]
pub struct CollisionFrameData {
    pub collisions: Vec<Collision>,
    pub simplex_cache: SimplexCache,
}
