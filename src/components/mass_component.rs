use bevy_ecs::component::Component;

/// Resistance to motion: mass and rotational inertia with their inverses.
///
/// An infinite mass yields `inverse_mass == 0`, which is how immovable
/// bodies (static planes, fixed boxes) are encoded. Set once at entity
/// construction.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MassComponent {
    pub mass: f32,
    pub inverse_mass: f32,
    pub inertia: f32,
    pub inverse_inertia: f32,
}

impl MassComponent {
    /// Builds the component for the given mass with infinite inertia; call
    /// [`set_inertia`](Self::set_inertia) afterwards for rotating bodies.
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            inverse_mass: 1.0 / mass,
            inertia: f32::INFINITY,
            inverse_inertia: 0.0,
        }
    }

    pub fn set_inertia(&mut self, inertia: f32) {
        self.inertia = inertia;
        self.inverse_inertia = 1.0 / inertia;
    }

    pub fn is_immovable(&self) -> bool {
        self.inverse_mass == 0.0
    }
}
