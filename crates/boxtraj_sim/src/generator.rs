use boxtraj_core::{
    Result, SimConfig, SimulationParameters, Trajectory, TrajectoryError, TrajectoryStore, Vec3,
};
use boxtraj_physics::{advance_in_place, sample_initial_positions, sample_initial_velocities};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// One generation run: current particle state plus the trajectory buffer
/// being filled. Each step records the state *after* advancing, so snapshot 0
/// is one time step past the initial conditions.
#[derive(Debug)]
pub struct Generator {
    params: SimulationParameters,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    store: TrajectoryStore,
    /// Next step index to record
    step: usize,
    /// Axis reflections so far
    reflections: usize,
}

impl Generator {
    /// Sample initial conditions from a ChaCha8 stream seeded with `config.seed`
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, &mut rng)
    }

    /// Sample initial conditions from a caller-supplied random source
    pub fn with_rng(config: &SimConfig, rng: &mut impl Rng) -> Result<Self> {
        config.validate()?;
        let positions = sample_initial_positions(config.particle_count, config.box_width, rng);
        let velocities =
            sample_initial_velocities(config.particle_count, config.max_initial_velocity, rng);
        Self::with_initial_state(config, positions, velocities)
    }

    /// Start from explicit initial conditions
    pub fn with_initial_state(
        config: &SimConfig,
        positions: Vec<Vec3>,
        velocities: Vec<Vec3>,
    ) -> Result<Self> {
        config.validate()?;
        let params = config.parameters()?;
        for found in [positions.len(), velocities.len()] {
            if found != params.particle_count {
                return Err(TrajectoryError::ShapeMismatch {
                    expected: params.particle_count,
                    found,
                });
            }
        }

        info!(
            particles = params.particle_count,
            steps = params.step_count,
            box_width = params.box_width,
            dt = params.time_step,
            "starting generation run"
        );

        Ok(Self {
            params,
            positions,
            velocities,
            store: TrajectoryStore::new(params),
            step: 0,
            reflections: 0,
        })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Steps recorded so far
    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn reflections(&self) -> usize {
        self.reflections
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.params.step_count
    }

    /// Advance one time step and record the result.
    /// Fails with `IndexOutOfRange` once every step has been recorded.
    pub fn step(&mut self) -> Result<()> {
        if self.is_finished() {
            return Err(TrajectoryError::index_out_of_range(
                self.step,
                self.params.step_count,
            ));
        }

        let bounced = advance_in_place(
            &mut self.positions,
            &mut self.velocities,
            self.params.time_step,
            self.params.box_width,
        );
        if bounced > 0 {
            debug!(step = self.step, bounced, "wall reflections");
        }
        self.reflections += bounced;

        self.store
            .record_step(self.step, &self.positions, &self.velocities)?;
        self.step += 1;
        Ok(())
    }

    /// Run the remaining steps and return the finished trajectory
    pub fn run(mut self) -> Result<Trajectory> {
        while !self.is_finished() {
            self.step()?;
        }
        self.finish()
    }

    /// Freeze the buffer; fails with `Incomplete` if steps remain
    pub fn finish(self) -> Result<Trajectory> {
        let reflections = self.reflections;
        let trajectory = self.store.finish()?;
        info!(
            steps = trajectory.step_count(),
            reflections, "generation run complete"
        );
        Ok(trajectory)
    }
}
