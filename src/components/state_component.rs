use bevy_ecs::component::Component;
use glam::{Mat4, Quat, Vec3};

/// Spatial state of an entity: position, rotation and scale in the scene.
///
/// Rotation is stored as Euler angles in degrees, applied X then Y then Z.
/// The integrator accumulates angular velocity in degrees and the hull
/// support search snaps per-axis angles, so the component keeps the angles
/// rather than a quaternion.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StateComponent {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for StateComponent {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl StateComponent {
    /// World transform of this entity: `translate * rotate * scale`.
    pub fn to_mat4(&self) -> Mat4 {
        transform_matrix(self.position, self.rotation, self.scale)
    }

    pub fn rotation_quat(&self) -> Quat {
        euler_rotation_quat(self.rotation)
    }
}

/// Builds `translate * rotate_x * rotate_y * rotate_z * scale` for Euler
/// angles given in degrees.
pub fn transform_matrix(translation: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(translation)
        * Mat4::from_quat(euler_rotation_quat(rotation_degrees))
        * Mat4::from_scale(scale)
}

/// Rotation quaternion for Euler angles in degrees, axes composed X, Y, Z.
pub fn euler_rotation_quat(rotation_degrees: Vec3) -> Quat {
    Quat::from_rotation_x(rotation_degrees.x.to_radians())
        * Quat::from_rotation_y(rotation_degrees.y.to_radians())
        * Quat::from_rotation_z(rotation_degrees.z.to_radians())
}

/// Rotates a vector by the Euler angles in degrees, applying the X axis
/// first, then Y, then Z, to the vector itself.
pub fn rotate_vector_xyz(v: Vec3, rotation_degrees: Vec3) -> Vec3 {
    let rotated = Quat::from_rotation_x(rotation_degrees.x.to_radians()) * v;
    let rotated = Quat::from_rotation_y(rotation_degrees.y.to_radians()) * rotated;
    Quat::from_rotation_z(rotation_degrees.z.to_radians()) * rotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn to_mat4_translates_points() {
        let state = StateComponent {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let world = state.to_mat4().transform_point3(Vec3::ZERO);
        assert_eq!(world, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn to_mat4_scales_before_rotating() {
        let state = StateComponent {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, 0.0, 90.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        // (1, 0, 0) scales to (2, 0, 0), then rotates 90 degrees about Z.
        let world = state.to_mat4().transform_point3(Vec3::X);
        assert_approx_eq!(world.x, 0.0, 1e-6);
        assert_approx_eq!(world.y, 2.0, 1e-6);
        assert_approx_eq!(world.z, 0.0, 1e-6);
    }

    #[test]
    fn rotation_quat_matches_matrix_rotation() {
        let state = StateComponent {
            rotation: Vec3::new(30.0, 45.0, 60.0),
            ..Default::default()
        };
        let by_quat = state.rotation_quat() * Vec3::X;
        let by_matrix = state.to_mat4().transform_vector3(Vec3::X);
        assert_approx_eq!(by_quat.x, by_matrix.x, 1e-5);
        assert_approx_eq!(by_quat.y, by_matrix.y, 1e-5);
        assert_approx_eq!(by_quat.z, by_matrix.z, 1e-5);
    }

    #[test]
    fn rotate_vector_xyz_applies_x_axis_first() {
        // Y rotated 90 degrees about X lands on +Z, then 90 degrees about Z
        // leaves it untouched.
        let rotated = rotate_vector_xyz(Vec3::Y, Vec3::new(90.0, 0.0, 90.0));
        assert_approx_eq!(rotated.x, 0.0, 1e-6);
        assert_approx_eq!(rotated.y, 0.0, 1e-6);
        assert_approx_eq!(rotated.z, 1.0, 1e-6);
    }
}
