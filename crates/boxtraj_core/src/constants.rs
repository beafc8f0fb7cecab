// Defaults reproduce the reference generation run:
// 5 particles in a 10-unit box, 10k steps of 10 ms.

/// Default number of particles
pub const DEFAULT_PARTICLE_COUNT: usize = 5;

/// Default box side length
pub const DEFAULT_BOX_WIDTH: f64 = 10.0;

/// Default bound on initial velocity components
pub const DEFAULT_MAX_INITIAL_VELOCITY: f64 = 5.0;

/// Default number of recorded steps
pub const DEFAULT_STEP_COUNT: usize = 10_000;

/// Default time step (seconds)
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 42;

/// Number of values per particle line: x y z vx vy vz
pub const VALUES_PER_PARTICLE: usize = 6;
