use bevy_ecs::resource::Resource;
use glam::Vec3;

/// Global gravity as a unit direction plus a magnitude. The default points
/// down the Y axis at 9.81 m/s^2.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Gravity {
    pub gravity_normal: Vec3,
    pub gravity_magnitude: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            gravity_normal: Vec3::NEG_Y,
            gravity_magnitude: 9.81,
        }
    }
}

impl Gravity {
    pub fn new(gravity_direction: Vec3, gravity_magnitude: f32) -> Self {
        Self {
            gravity_normal: gravity_direction.normalize(),
            gravity_magnitude,
        }
    }

    pub fn gravity_vector(&self) -> Vec3 {
        self.gravity_normal * self.gravity_magnitude
    }

    pub fn up(&self) -> Vec3 {
        -self.gravity_normal
    }
}
