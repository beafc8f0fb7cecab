use boxtraj_core::{Result, Trajectory, TrajectoryError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bumped whenever the binary layout changes
pub const CHECKPOINT_VERSION: u32 = 1;

/// Binary image of a trajectory for fast reload
#[derive(Serialize, Deserialize)]
struct Checkpoint {
    version: u32,
    trajectory: Trajectory,
}

/// Save a trajectory to disk as bincode
pub fn save_checkpoint(trajectory: &Trajectory, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let checkpoint = Checkpoint {
        version: CHECKPOINT_VERSION,
        trajectory: trajectory.clone(),
    };
    let data = bincode::serialize(&checkpoint)
        .map_err(|e| TrajectoryError::Checkpoint(format!("serialize: {e}")))?;
    fs::write(path, &data)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote checkpoint");
    Ok(())
}

/// Load a checkpoint. The shape invariant is re-checked while decoding.
pub fn load_checkpoint(path: &Path) -> Result<Trajectory> {
    let data = fs::read(path)?;
    let checkpoint: Checkpoint = bincode::deserialize(&data)
        .map_err(|e| TrajectoryError::Checkpoint(format!("deserialize: {e}")))?;
    if checkpoint.version != CHECKPOINT_VERSION {
        return Err(TrajectoryError::Checkpoint(format!(
            "unsupported checkpoint version {} (expected {CHECKPOINT_VERSION})",
            checkpoint.version
        )));
    }
    Ok(checkpoint.trajectory)
}
