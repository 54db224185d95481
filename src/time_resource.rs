use bevy_ecs::prelude::*;

/// Frame timing for the fixed-step simulation.
#[derive(Resource)]
pub struct TimeResource {
    simulation_fixed_dt: f32,
    total_time: f64,
    frame_count: u64,
}

impl Default for TimeResource {
    fn default() -> Self {
        TimeResource {
            simulation_fixed_dt: 1.0 / 60.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }
}

impl TimeResource {
    pub fn new(simulation_fixed_dt: f32) -> Self {
        TimeResource {
            simulation_fixed_dt,
            ..Default::default()
        }
    }

    pub fn set_simulation_fixed_dt(&mut self, fixed_dt: f32) {
        self.simulation_fixed_dt = fixed_dt;
    }

    pub fn simulation_fixed_dt(&self) -> f32 {
        self.simulation_fixed_dt
    }

    /// Advances the frame counters; call once per simulated step.
    pub fn advance_frame(&mut self) {
        self.total_time += self.simulation_fixed_dt as f64;
        self.frame_count += 1;
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
