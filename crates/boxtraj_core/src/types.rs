use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajectoryError};

/// Cartesian triple (x, y, z)
pub type Vec3 = [f64; 3];

/// State of one particle at one step.
/// repr(C) + Pod so a snapshot can be viewed as a flat `[f64]` row buffer
/// in the `x y z vx vy vz` order of the text format.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl ParticleState {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// Build from a `x y z vx vy vz` row
    pub fn from_row(row: [f64; 6]) -> Self {
        bytemuck::cast(row)
    }

    pub fn as_row(&self) -> &[f64; 6] {
        bytemuck::cast_ref(self)
    }
}

/// Flatten a snapshot into consecutive 6-value rows
pub fn flatten_states(states: &[ParticleState]) -> &[f64] {
    bytemuck::cast_slice(states)
}

/// Run metadata, fixed for the whole trajectory.
/// [`SimulationParameters::new`] enforces that every field is positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub particle_count: usize,
    pub box_width: f64,
    pub step_count: usize,
    pub time_step: f64,
}

impl SimulationParameters {
    pub fn new(
        particle_count: usize,
        box_width: f64,
        step_count: usize,
        time_step: f64,
    ) -> Result<Self> {
        if particle_count == 0 {
            return Err(TrajectoryError::config("particle_count must be > 0"));
        }
        if step_count == 0 {
            return Err(TrajectoryError::config("step_count must be > 0"));
        }
        if particle_count.checked_mul(step_count).is_none() {
            return Err(TrajectoryError::config(format!(
                "{particle_count} particles x {step_count} steps overflows the state buffer"
            )));
        }
        if !is_positive_finite(box_width) {
            return Err(TrajectoryError::config(format!(
                "box_width must be finite and > 0, got {box_width}"
            )));
        }
        if !is_positive_finite(time_step) {
            return Err(TrajectoryError::config(format!(
                "time_step must be finite and > 0, got {time_step}"
            )));
        }
        Ok(Self {
            particle_count,
            box_width,
            step_count,
            time_step,
        })
    }

    /// Total particle entries across all steps
    pub fn total_states(&self) -> usize {
        self.particle_count * self.step_count
    }
}

fn is_positive_finite(x: f64) -> bool {
    x.is_finite() && x > 0.0
}
