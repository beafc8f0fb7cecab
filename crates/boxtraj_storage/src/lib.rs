pub mod checkpoint;
pub mod text;

use boxtraj_core::{Result, Trajectory};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub use checkpoint::{load_checkpoint, save_checkpoint};
pub use text::{deserialize, read_trajectory, serialize, write_trajectory};

/// Save a trajectory in the text format.
/// The whole file is rendered in memory first, then written in one go.
pub fn save_trajectory(trajectory: &Trajectory, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = serialize(trajectory);
    fs::write(path, &text)?;
    tracing::info!(
        path = %path.display(),
        steps = trajectory.step_count(),
        bytes = text.len(),
        "saved trajectory"
    );
    Ok(())
}

/// Load a text-format trajectory for playback
pub fn load_trajectory(path: &Path) -> Result<Trajectory> {
    let file = File::open(path)?;
    let trajectory = read_trajectory(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        particles = trajectory.particle_count(),
        steps = trajectory.step_count(),
        "loaded trajectory"
    );
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtraj_core::{SimulationParameters, TrajectoryError, TrajectoryStore};

    #[test]
    fn test_save_and_load() {
        let params = SimulationParameters::new(1, 2.0, 2, 0.5).unwrap();
        let mut store = TrajectoryStore::new(params);
        store.record_step(0, &[[0.5, 1.0, 1.5]], &[[1.0, 0.0, -1.0]]).unwrap();
        store.record_step(1, &[[1.0, 1.0, 1.0]], &[[1.0, 0.0, -1.0]]).unwrap();
        let traj = store.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/system.txt");
        save_trajectory(&traj, &path).unwrap();
        assert_eq!(load_trajectory(&path).unwrap(), traj);
    }

    #[test]
    fn test_load_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.txt");
        fs::write(&path, "1\n1.0\n5\n0.1\n\n0 0 0 0 0 0\n\n0 0 0 0 0 0\n").unwrap();
        let err = load_trajectory(&path).unwrap_err();
        assert!(err.is_format(), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_trajectory(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, TrajectoryError::Io(_)));
    }
}
