use std::sync::Arc;
use std::time::Duration;

use boxtraj_core::{Result, Trajectory, TrajectoryError, Vec3};

/// Frame cursor for replaying a loaded trajectory on a timer.
///
/// The trajectory is shared, so several cursors (or other readers) can walk
/// the same buffer independently.
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    trajectory: Arc<Trajectory>,
    current: usize,
    paused: bool,
}

impl PlaybackCursor {
    pub fn new(trajectory: Arc<Trajectory>) -> Self {
        Self {
            trajectory,
            current: 0,
            paused: false,
        }
    }

    pub fn trajectory(&self) -> &Arc<Trajectory> {
        &self.trajectory
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Positions at the cursor.
    /// `current` stays in `[0, step_count)` via advance/seek, so this only
    /// fails if that invariant is broken.
    pub fn current_frame(&self) -> Result<Vec<Vec3>> {
        self.trajectory.frame_at(self.current)
    }

    /// Move to the next frame, wrapping to 0 after the last one.
    /// Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.trajectory.step_count();
        self.current
    }

    /// Jump to a frame
    pub fn seek(&mut self, index: usize) -> Result<()> {
        let len = self.trajectory.step_count();
        if index >= len {
            return Err(TrajectoryError::index_out_of_range(index, len));
        }
        self.current = index;
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause if running, resume if paused. Returns the new paused state.
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Timer callback: advance unless paused, then return the frame to draw
    pub fn tick(&mut self) -> Result<Vec<Vec3>> {
        if !self.paused {
            self.advance();
        }
        self.current_frame()
    }

    /// Real-time spacing between frames: one recorded time step.
    /// Saturates at `Duration::MAX` for steps too long to represent.
    pub fn frame_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.trajectory.time_step_seconds()).unwrap_or(Duration::MAX)
    }
}
