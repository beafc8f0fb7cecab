use boxtraj_core::Vec3;
use rand::Rng;

/// Sample `n` positions uniformly inside the box: each coordinate in `[0, box_width)`
pub fn sample_initial_positions(n: usize, box_width: f64, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..n)
        .map(|_| {
            [
                unit(rng) * box_width,
                unit(rng) * box_width,
                unit(rng) * box_width,
            ]
        })
        .collect()
}

/// Sample `n` velocities: each component in `[-max_velocity, max_velocity)`.
/// `max_velocity == 0` gives particles at rest.
pub fn sample_initial_velocities(n: usize, max_velocity: f64, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..n)
        .map(|_| {
            [
                symmetric(rng, max_velocity),
                symmetric(rng, max_velocity),
                symmetric(rng, max_velocity),
            ]
        })
        .collect()
}

fn unit(rng: &mut impl Rng) -> f64 {
    rng.gen_range(0.0..1.0)
}

// Scaled from [0, 1) rather than gen_range(-max..max), which rejects an empty range
fn symmetric(rng: &mut impl Rng, max: f64) -> f64 {
    2.0 * max * (unit(rng) - 0.5)
}
