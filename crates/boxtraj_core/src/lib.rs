pub mod config;
pub mod constants;
pub mod error;
pub mod trajectory;
pub mod types;

pub use config::SimConfig;
pub use constants::*;
pub use error::{Result, TrajectoryError};
pub use trajectory::{Trajectory, TrajectoryStore};
pub use types::*;
