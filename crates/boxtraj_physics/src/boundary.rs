use boxtraj_core::{Trajectory, Vec3};

/// How far a coordinate lies outside `[0, box_width]`; 0 when inside
pub fn axis_excursion(c: f64, box_width: f64) -> f64 {
    if c > box_width {
        c - box_width
    } else if c < 0.0 {
        -c
    } else {
        0.0
    }
}

/// Largest excursion of any coordinate in one frame
pub fn frame_excursion(positions: &[Vec3], box_width: f64) -> f64 {
    positions
        .iter()
        .flatten()
        .map(|&c| axis_excursion(c, box_width))
        .fold(0.0, f64::max)
}

/// Largest distance any recorded position lies outside the box.
/// Reflection lets a particle overshoot by at most `|v| * dt` for one frame.
pub fn max_excursion(trajectory: &Trajectory) -> f64 {
    let w = trajectory.box_width();
    trajectory
        .states()
        .iter()
        .flat_map(|s| s.position)
        .map(|c| axis_excursion(c, w))
        .fold(0.0, f64::max)
}

/// Frames with at least one position outside the box
pub fn frames_outside(trajectory: &Trajectory) -> usize {
    let w = trajectory.box_width();
    trajectory
        .snapshots()
        .filter(|snap| snap.iter().flat_map(|s| s.position).any(|c| axis_excursion(c, w) > 0.0))
        .count()
}
