pub mod collidable_component;
pub mod mass_component;
pub mod mesh_component;
pub mod movable_component;
pub mod state_component;
