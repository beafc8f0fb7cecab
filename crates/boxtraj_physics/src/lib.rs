pub mod boundary;
pub mod integrator;
pub mod particle;

pub use integrator::{advance, advance_in_place, reflect_axis};
pub use particle::{sample_initial_positions, sample_initial_velocities};
