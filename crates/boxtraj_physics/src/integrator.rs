use boxtraj_core::Vec3;

/// Move one coordinate by `v * dt` and reflect the velocity if the tentative
/// position left `[0, box_width]`.
///
/// The returned position is NOT clamped back into the box: it may sit outside
/// by up to `|v| * dt` for this one step, and the flipped velocity carries it
/// back in on the next.
#[inline]
pub fn reflect_axis(p: f64, v: f64, dt: f64, box_width: f64) -> (f64, f64) {
    let next = p + v * dt;
    let v = if next > box_width || next < 0.0 { -v } else { v };
    (next, v)
}

/// Advance every particle by one time step inside a reflecting box.
///
/// Axes are independent: a particle crossing the x wall flips only `vx`.
/// Pure function of its inputs.
///
/// # Panics
/// If `positions` and `velocities` differ in length.
pub fn advance(
    positions: &[Vec3],
    velocities: &[Vec3],
    dt: f64,
    box_width: f64,
) -> (Vec<Vec3>, Vec<Vec3>) {
    assert_eq!(
        positions.len(),
        velocities.len(),
        "positions and velocities must describe the same particles"
    );

    let mut new_positions = positions.to_vec();
    let mut new_velocities = velocities.to_vec();
    advance_in_place(&mut new_positions, &mut new_velocities, dt, box_width);
    (new_positions, new_velocities)
}

/// In-place form of [`advance`]. Returns how many axis reflections happened.
pub fn advance_in_place(
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    dt: f64,
    box_width: f64,
) -> usize {
    let mut reflections = 0;
    for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
        for axis in 0..3 {
            let (p, v) = reflect_axis(pos[axis], vel[axis], dt, box_width);
            if v != vel[axis] {
                reflections += 1;
            }
            pos[axis] = p;
            vel[axis] = v;
        }
    }
    reflections
}
