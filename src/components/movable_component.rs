use bevy_ecs::component::Component;
use glam::Vec3;

/// Dynamic state of a moving entity: the force and torque applied this
/// frame plus the linear and angular motion derived from them.
///
/// Force and torque are overwritten by collision response each frame, not
/// accumulated across contacts.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct MovableComponent {
    pub force: Vec3,
    pub momentum: Vec3,
    pub velocity: Vec3,
    pub torque: Vec3,
    pub angular_momentum: Vec3,
    pub angular_velocity: Vec3,
}
