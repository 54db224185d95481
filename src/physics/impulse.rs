use glam::Vec3;
use std::f32::consts::PI;

use crate::components::collidable_component::{CollidableComponent, ShapeKind};
use crate::components::mass_component::MassComponent;
use crate::components::movable_component::MovableComponent;
use crate::components::state_component::{rotate_vector_xyz, StateComponent};
use crate::gravity_resource::Gravity;
use crate::physics::epa::ContactPoint;

const REST_MOMENTUM: f32 = 1e-2;
const REST_FORCE: f32 = 0.001;
const UP_ALIGNMENT_LIMIT: f32 = 0.9985;
const ROLLING_TORQUE_FACTOR: f32 = 5.0;

/// One side of a collision as seen by the response pass.
pub struct Participant<'a> {
    pub state: &'a StateComponent,
    pub mass: &'a MassComponent,
    pub collidable: &'a CollidableComponent,
    pub movable: Option<&'a mut MovableComponent>,
}

/// Turns a resolved contact into fresh force and torque on the movable
/// participants. The computed values overwrite whatever the components held
/// before; contacts resolved later in the same frame win.
pub struct ImpulseCalculator {
    restitution: f32,
    friction: f32,
    inverse_mass_total: f32,
    gravity_direction: Vec3,
    gravity_magnitude: f32,
    dt: f32,
    dir_of_motion: Vec3,
}

impl ImpulseCalculator {
    pub fn calculate(
        contact: &mut ContactPoint,
        mut a: Participant,
        mut b: Participant,
        gravity: &Gravity,
        dt: f32,
    ) {
        let mut calculator = Self {
            restitution: (a.collidable.restitution * b.collidable.restitution).min(1.0),
            friction: ((a.collidable.friction + b.collidable.friction) / 2.0).min(1.0),
            inverse_mass_total: a.mass.inverse_mass + b.mass.inverse_mass,
            gravity_direction: gravity.gravity_normal,
            gravity_magnitude: gravity.gravity_magnitude,
            dt,
            dir_of_motion: Vec3::ZERO,
        };

        match (a.movable.is_some(), b.movable.is_some()) {
            (true, true) => {
                calculator.generate_resultant_force(contact, &mut a);
                calculator.generate_torque(contact, &mut a);
                calculator.generate_resultant_force(contact, &mut b);
                calculator.generate_torque(contact, &mut b);
            }
            (true, false) => {
                calculator.generate_resultant_force(contact, &mut a);
                calculator.generate_torque(contact, &mut a);
                calculator.apply_friction(contact, &mut a);
            }
            (false, true) => {
                calculator.generate_resultant_force(contact, &mut b);
                calculator.generate_torque(contact, &mut b);
                calculator.apply_friction(contact, &mut b);
            }
            (false, false) => {}
        }
    }

    fn generate_resultant_force(&mut self, contact: &mut ContactPoint, participant: &mut Participant) {
        let Some(movable) = participant.movable.as_deref_mut() else {
            return;
        };

        if movable.momentum.length() < REST_MOMENTUM {
            movable.momentum = Vec3::ZERO;
        }
        self.dir_of_motion = if movable.momentum == Vec3::ZERO {
            Vec3::NEG_Y
        } else {
            movable.momentum.normalize()
        };

        // The contact normal must oppose the direction of motion.
        if self.dir_of_motion.dot(contact.world_normal) > 0.0 {
            contact.world_normal = -contact.world_normal;
        } else if (self.dir_of_motion == Vec3::Y || self.dir_of_motion == Vec3::NEG_Y)
            && self.dir_of_motion.dot(contact.world_normal).abs() < 0.55
        {
            // Near-vertical motion against a nearly perpendicular normal is
            // unstable; pin the normal straight against the motion.
            contact.world_normal = -self.dir_of_motion;
        }

        let relative_velocity = -(movable.velocity * (self.restitution + 1.0));
        let normal_velocity = relative_velocity.dot(contact.world_normal);
        let impulse_magnitude = normal_velocity / self.inverse_mass_total;
        let mut resultant = contact.world_normal * impulse_magnitude / self.dt;

        if !resultant.is_finite() {
            resultant = Vec3::ZERO;
        } else if resultant.length() <= REST_FORCE {
            // Numerical jitter at rest; park the body instead of nudging it.
            movable.momentum = Vec3::ZERO;
            movable.velocity = Vec3::ZERO;
            resultant = Vec3::ZERO;
        } else if resultant.dot(self.dir_of_motion) > 0.0 {
            resultant = -resultant;
        }
        movable.force = resultant;
    }

    fn generate_torque(&mut self, contact: &ContactPoint, participant: &mut Participant) {
        let Some(movable) = participant.movable.as_deref_mut() else {
            return;
        };

        let torque_direction = contact.world_normal.cross(self.dir_of_motion);
        let orientation = rotate_vector_xyz(Vec3::Y, participant.state.rotation);
        let alignment = contact.world_normal.dot(orientation);

        let mut torque = Vec3::ZERO;
        if torque_direction != Vec3::ZERO
            && alignment < UP_ALIGNMENT_LIMIT
            && alignment > -UP_ALIGNMENT_LIMIT
        {
            torque = torque_direction.normalize()
                * (self.gravity_magnitude * participant.mass.mass);
        }
        movable.torque = torque;
        if participant.collidable.shape == ShapeKind::Ball {
            movable.torque *= ROLLING_TORQUE_FACTOR;
        }
    }

    /// Tangential friction for a body sliding along an immovable surface.
    fn apply_friction(&mut self, contact: &ContactPoint, participant: &mut Participant) {
        let Some(movable) = participant.movable.as_deref_mut() else {
            return;
        };

        // Only while moving roughly along the surface, not into it.
        if self.dir_of_motion.dot(contact.world_normal).abs() >= 0.25 {
            return;
        }

        let down = self.gravity_direction;
        let angle = PI - down.angle_between(contact.world_normal);
        let normal_force = contact.world_normal
            * (participant.mass.mass * self.gravity_magnitude * angle.cos());
        let frictional = -self.dir_of_motion * (normal_force.length() * self.friction);

        // Friction may slow the slide but never reverse the downward force.
        if frictional.length_squared() > 0.0 && (movable.force + frictional).dot(down) >= 0.0 {
            movable.force += frictional;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh_component::MeshComponent;
    use assert_approx_eq::assert_approx_eq;

    const DT: f32 = 1.0 / 60.0;

    struct Body {
        state: StateComponent,
        mass: MassComponent,
        collidable: CollidableComponent,
        movable: Option<MovableComponent>,
    }

    fn movable_box(mass: f32, restitution: f32, friction: f32) -> Body {
        let mesh = MeshComponent::unit_cube();
        let state = StateComponent::default();
        let mut mass_component = MassComponent::new(mass);
        mass_component.set_inertia(mass / 6.0);
        Body {
            collidable: CollidableComponent::new(&mesh, &state, restitution, friction, ShapeKind::Box),
            state,
            mass: mass_component,
            movable: Some(MovableComponent::default()),
        }
    }

    fn fixed_plane(restitution: f32, friction: f32) -> Body {
        let mesh = MeshComponent::unit_cube();
        let state = StateComponent {
            scale: Vec3::new(10.0, 0.0, 10.0),
            ..Default::default()
        };
        Body {
            collidable: CollidableComponent::new(&mesh, &state, restitution, friction, ShapeKind::Plane),
            state,
            mass: MassComponent::new(f32::INFINITY),
            movable: None,
        }
    }

    fn participant(body: &mut Body) -> Participant<'_> {
        Participant {
            state: &body.state,
            mass: &body.mass,
            collidable: &body.collidable,
            movable: body.movable.as_mut(),
        }
    }

    fn floor_contact() -> ContactPoint {
        ContactPoint {
            world_point: Vec3::new(0.0, -0.5, 0.0),
            world_normal: Vec3::Y,
            penetration_depth: 0.01,
        }
    }

    #[test]
    fn resting_body_is_parked_with_zero_force() {
        let mut a = movable_box(1.0, 0.6, 0.0);
        a.movable.as_mut().unwrap().force = Vec3::new(0.0, -9.81, 0.0);
        let mut b = fixed_plane(1.0, 0.0);
        let mut contact = floor_contact();

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        let movable = a.movable.unwrap();
        assert_eq!(movable.force, Vec3::ZERO);
        assert_eq!(movable.momentum, Vec3::ZERO);
        assert_eq!(movable.velocity, Vec3::ZERO);
    }

    #[test]
    fn falling_body_gets_an_opposing_force() {
        let mut a = movable_box(1.0, 0.6, 0.0);
        {
            let movable = a.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(0.0, -2.0, 0.0);
            movable.velocity = Vec3::new(0.0, -2.0, 0.0);
        }
        let mut b = fixed_plane(1.0, 0.0);
        let mut contact = floor_contact();

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        let movable = a.movable.unwrap();
        assert!(movable.force.y > 0.0, "force must push away from the floor");
        assert_eq!(movable.force.x, 0.0);
        // |F| = |v| * (1 + e) / invMass / dt
        assert_approx_eq!(movable.force.y, 2.0 * 1.6 / DT, 1e-2);
    }

    #[test]
    fn normal_is_flipped_to_oppose_motion() {
        let mut a = movable_box(1.0, 0.5, 0.0);
        {
            let movable = a.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(0.0, -1.0, 0.0);
            movable.velocity = Vec3::new(0.0, -1.0, 0.0);
        }
        let mut b = fixed_plane(1.0, 0.0);
        // Normal handed in pointing with the motion.
        let mut contact = ContactPoint {
            world_normal: Vec3::NEG_Y,
            ..floor_contact()
        };

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        assert_eq!(contact.world_normal, Vec3::Y);
        assert!(a.movable.unwrap().force.y > 0.0);
    }

    #[test]
    fn torque_is_zero_when_normal_aligns_with_up() {
        let mut a = movable_box(1.0, 0.5, 0.0);
        {
            let movable = a.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(0.0, -1.0, 0.0);
            movable.velocity = Vec3::new(0.0, -1.0, 0.0);
        }
        let mut b = fixed_plane(1.0, 0.0);
        let mut contact = floor_contact();

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        // Normal and entity up are parallel: no lever arm to rotate about.
        assert_eq!(a.movable.unwrap().torque, Vec3::ZERO);
    }

    #[test]
    fn sliding_on_a_slope_produces_torque() {
        let mut a = movable_box(2.0, 0.5, 0.0);
        {
            let movable = a.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(1.0, 0.0, 0.0);
            movable.velocity = Vec3::new(0.5, 0.0, 0.0);
        }
        let mut b = fixed_plane(1.0, 0.0);
        // Slope normal tilted off the motion axis.
        let mut contact = ContactPoint {
            world_normal: Vec3::new(-0.196, 0.981, 0.0).normalize(),
            ..floor_contact()
        };

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        let torque = a.movable.as_ref().unwrap().torque;
        assert!(torque.length() > 0.0);
        assert_approx_eq!(torque.length(), 9.81 * 2.0, 1e-3);
    }

    #[test]
    fn ball_torque_is_scaled_for_rolling() {
        let mesh = MeshComponent::uv_sphere(8, 12);
        let state = StateComponent::default();
        let mut mass = MassComponent::new(2.0);
        mass.set_inertia(0.4 * 2.0 * 0.25);
        let mut ball = Body {
            collidable: CollidableComponent::new(&mesh, &state, 0.5, 0.0, ShapeKind::Ball),
            state,
            mass,
            movable: Some(MovableComponent {
                momentum: Vec3::new(1.0, 0.0, 0.0),
                velocity: Vec3::new(0.5, 0.0, 0.0),
                ..Default::default()
            }),
        };
        let mut plane = fixed_plane(1.0, 0.0);
        let mut contact = ContactPoint {
            world_normal: Vec3::new(-0.196, 0.981, 0.0).normalize(),
            ..floor_contact()
        };

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut ball),
            participant(&mut plane),
            &Gravity::default(),
            DT,
        );

        let torque = ball.movable.as_ref().unwrap().torque;
        assert_approx_eq!(torque.length(), 9.81 * 2.0 * 5.0, 5e-3);
    }

    #[test]
    fn friction_opposes_a_horizontal_slide() {
        let mut a = movable_box(1.0, 0.0, 0.8);
        {
            let movable = a.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(3.0, 0.0, 0.0);
            movable.velocity = Vec3::new(3.0, 0.0, 0.0);
            movable.force = Vec3::new(0.0, -9.81, 0.0);
        }
        let mut b = fixed_plane(1.0, 0.8);
        let mut contact = floor_contact();

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        let force = a.movable.unwrap().force;
        assert!(force.x < 0.0, "friction must oppose the slide, got {force}");
    }

    #[test]
    fn two_movable_bodies_both_receive_forces() {
        let mut a = movable_box(1.0, 0.5, 0.0);
        let mut b = movable_box(1.0, 0.5, 0.0);
        {
            let movable = a.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(2.0, 0.0, 0.0);
            movable.velocity = Vec3::new(2.0, 0.0, 0.0);
        }
        {
            let movable = b.movable.as_mut().unwrap();
            movable.momentum = Vec3::new(-2.0, 0.0, 0.0);
            movable.velocity = Vec3::new(-2.0, 0.0, 0.0);
        }
        let mut contact = ContactPoint {
            world_point: Vec3::new(0.5, 0.0, 0.0),
            world_normal: Vec3::X,
            penetration_depth: 0.05,
        };

        ImpulseCalculator::calculate(
            &mut contact,
            participant(&mut a),
            participant(&mut b),
            &Gravity::default(),
            DT,
        );

        let force_a = a.movable.unwrap().force;
        let force_b = b.movable.unwrap().force;
        assert!(force_a.x < 0.0);
        assert!(force_b.x > 0.0);
    }
}
