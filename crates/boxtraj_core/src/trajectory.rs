use bytemuck::Zeroable;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajectoryError};
use crate::types::{ParticleState, SimulationParameters, Vec3};

/// A complete run: parameters plus `step_count` snapshots of
/// `particle_count` states each, stored step-major in one flat buffer.
///
/// Never mutated after construction, so it can be shared between readers
/// (e.g. behind an `Arc`) without locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrajectory")]
pub struct Trajectory {
    params: SimulationParameters,
    states: Vec<ParticleState>,
}

/// Unchecked serde image of a [`Trajectory`]
#[derive(Deserialize)]
struct RawTrajectory {
    params: SimulationParameters,
    states: Vec<ParticleState>,
}

impl TryFrom<RawTrajectory> for Trajectory {
    type Error = TrajectoryError;

    fn try_from(raw: RawTrajectory) -> Result<Self> {
        Trajectory::from_states(raw.params, raw.states)
    }
}

impl Trajectory {
    /// Wrap a step-major state buffer, checking it holds exactly
    /// `step_count * particle_count` entries.
    pub fn from_states(params: SimulationParameters, states: Vec<ParticleState>) -> Result<Self> {
        let params = SimulationParameters::new(
            params.particle_count,
            params.box_width,
            params.step_count,
            params.time_step,
        )?;
        if states.len() != params.total_states() {
            return Err(TrajectoryError::ShapeMismatch {
                expected: params.total_states(),
                found: states.len(),
            });
        }
        Ok(Self { params, states })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn particle_count(&self) -> usize {
        self.params.particle_count
    }

    pub fn step_count(&self) -> usize {
        self.params.step_count
    }

    pub fn box_width(&self) -> f64 {
        self.params.box_width
    }

    pub fn time_step_seconds(&self) -> f64 {
        self.params.time_step
    }

    /// All particle states of one step
    pub fn snapshot(&self, index: usize) -> Result<&[ParticleState]> {
        if index >= self.params.step_count {
            return Err(TrajectoryError::index_out_of_range(
                index,
                self.params.step_count,
            ));
        }
        let n = self.params.particle_count;
        Ok(&self.states[index * n..(index + 1) * n])
    }

    /// Particle positions at one step, in particle-index order
    pub fn frame_at(&self, index: usize) -> Result<Vec<Vec3>> {
        Ok(self.snapshot(index)?.iter().map(|s| s.position).collect())
    }

    /// Particle velocities at one step, in particle-index order
    pub fn velocities_at(&self, index: usize) -> Result<Vec<Vec3>> {
        Ok(self.snapshot(index)?.iter().map(|s| s.velocity).collect())
    }

    /// Snapshots in step order
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = &[ParticleState]> {
        self.states.chunks_exact(self.params.particle_count)
    }

    /// Flat step-major buffer
    pub fn states(&self) -> &[ParticleState] {
        &self.states
    }
}

/// Generation-time trajectory buffer.
///
/// Steps may be filled in any order, but the buffer only becomes a
/// [`Trajectory`] once every step has been recorded.
#[derive(Debug)]
pub struct TrajectoryStore {
    params: SimulationParameters,
    states: Vec<ParticleState>,
    recorded: Vec<bool>,
}

impl TrajectoryStore {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            states: vec![ParticleState::zeroed(); params.total_states()],
            recorded: vec![false; params.step_count],
            params,
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Write the full state of every particle for one step.
    /// Re-recording a step overwrites it.
    pub fn record_step(
        &mut self,
        step_index: usize,
        positions: &[Vec3],
        velocities: &[Vec3],
    ) -> Result<()> {
        let n = self.params.particle_count;
        if step_index >= self.params.step_count {
            return Err(TrajectoryError::index_out_of_range(
                step_index,
                self.params.step_count,
            ));
        }
        for found in [positions.len(), velocities.len()] {
            if found != n {
                return Err(TrajectoryError::ShapeMismatch { expected: n, found });
            }
        }

        let slot = &mut self.states[step_index * n..(step_index + 1) * n];
        for ((state, &position), &velocity) in slot.iter_mut().zip(positions).zip(velocities) {
            *state = ParticleState::new(position, velocity);
        }
        self.recorded[step_index] = true;
        Ok(())
    }

    pub fn recorded_steps(&self) -> usize {
        self.recorded.iter().filter(|&&r| r).count()
    }

    /// First step that has not been recorded yet
    pub fn first_missing_step(&self) -> Option<usize> {
        self.recorded.iter().position(|&r| !r)
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing_step().is_none()
    }

    /// Freeze into an immutable [`Trajectory`]
    pub fn finish(self) -> Result<Trajectory> {
        if let Some(step) = self.first_missing_step() {
            return Err(TrajectoryError::Incomplete { step });
        }
        Trajectory::from_states(self.params, self.states)
    }
}
