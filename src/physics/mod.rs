pub mod bounding_box;
pub mod broad_phase;
pub mod collision_system;
pub mod convex_hull;
pub mod dynamics_system;
pub mod epa;
pub mod gjk;
pub mod impulse;
pub mod integrator;
pub mod physics_resource;
pub mod simplex;
