//! Line-oriented text format shared by the generator and playback tools.
//!
//! ```text
//! particle_count
//! box_width
//! step_count
//! time_step
//!                      <- blank line before every step
//! x y z vx vy vz       <- one line per particle, particle-index order
//! ...
//! ```
//!
//! There is no end marker: a reader knows it is done after `step_count`
//! blocks of `particle_count + 1` lines.

use std::fmt;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

use boxtraj_core::{
    ParticleState, Result, SimulationParameters, Trajectory, TrajectoryError,
    VALUES_PER_PARTICLE,
};

// Cap on up-front allocation; the header counts are untrusted until the body is read
const MAX_PREALLOCATED_STATES: usize = 1 << 20;

/// `Display` adapter that renders a trajectory in the text format.
///
/// Reals use the shortest representation that parses back to the same
/// `f64`, so a write/read cycle is lossless.
pub struct TextTrajectory<'a>(pub &'a Trajectory);

impl fmt::Display for TextTrajectory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.0.params();
        writeln!(f, "{}", params.particle_count)?;
        writeln!(f, "{:?}", params.box_width)?;
        writeln!(f, "{}", params.step_count)?;
        writeln!(f, "{:?}", params.time_step)?;

        for snapshot in self.0.snapshots() {
            writeln!(f)?;
            for state in snapshot {
                let [x, y, z, vx, vy, vz] = *state.as_row();
                writeln!(f, "{x:?} {y:?} {z:?} {vx:?} {vy:?} {vz:?}")?;
            }
        }
        Ok(())
    }
}

/// Render a trajectory to a string
pub fn serialize(trajectory: &Trajectory) -> String {
    TextTrajectory(trajectory).to_string()
}

/// Write a trajectory to any byte sink
pub fn write_trajectory<W: Write>(trajectory: &Trajectory, mut writer: W) -> Result<()> {
    write!(writer, "{}", TextTrajectory(trajectory))?;
    writer.flush()?;
    Ok(())
}

/// Parse a trajectory from a string
pub fn deserialize(text: &str) -> Result<Trajectory> {
    read_trajectory(text.as_bytes())
}

/// Read a trajectory by counted reads: the four header lines, then
/// `step_count` blocks of one (unchecked) delimiter line plus
/// `particle_count` particle lines. Anything after the last block is ignored.
pub fn read_trajectory<R: BufRead>(reader: R) -> Result<Trajectory> {
    let mut lines = LineReader::new(reader);

    let particle_count: usize = lines.header("particle_count", |&n| n > 0)?;
    let box_width: f64 = lines.header("box_width", |&w: &f64| w.is_finite() && w > 0.0)?;
    let step_count: usize = lines.header("step_count", |&n| n > 0)?;
    let time_step: f64 = lines.header("time_step", |&dt: &f64| dt.is_finite() && dt > 0.0)?;

    // Fields are individually valid here; what remains is the buffer size check
    let params = SimulationParameters::new(particle_count, box_width, step_count, time_step)
        .map_err(|e| TrajectoryError::format(lines.line, format!("invalid header: {e}")))?;

    let mut states = Vec::with_capacity(params.total_states().min(MAX_PREALLOCATED_STATES));
    for step in 0..params.step_count {
        lines.next_line(|| format!("delimiter before step {step}"))?;
        for particle in 0..params.particle_count {
            let text = lines.next_line(|| format!("particle {particle} of step {step}"))?;
            let row = parse_row(&text, lines.line)?;
            states.push(ParticleState::from_row(row));
        }
    }

    tracing::debug!(
        particles = params.particle_count,
        steps = params.step_count,
        lines = lines.line,
        "parsed trajectory"
    );
    Trajectory::from_states(params, states)
}

/// Counts lines so errors can point at them
struct LineReader<R> {
    lines: std::io::Lines<R>,
    /// 1-based number of the last line handed out
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self, expected: impl FnOnce() -> String) -> Result<String> {
        self.line += 1;
        match self.lines.next() {
            Some(Ok(line)) => Ok(line),
            Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
                Err(TrajectoryError::format(self.line, "invalid UTF-8"))
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(TrajectoryError::format(
                self.line,
                format!("unexpected end of stream, expected {}", expected()),
            )),
        }
    }

    /// Parse one header line and check it against `valid`
    fn header<T>(&mut self, name: &str, valid: impl Fn(&T) -> bool) -> Result<T>
    where
        T: FromStr + fmt::Display,
        T::Err: fmt::Display,
    {
        let text = self.next_line(|| format!("header field {name}"))?;
        let value: T = text.trim().parse().map_err(|e| {
            TrajectoryError::format(self.line, format!("bad {name} {:?}: {e}", text.trim()))
        })?;
        if !valid(&value) {
            return Err(TrajectoryError::format(
                self.line,
                format!("{name} must be finite and > 0, got {value}"),
            ));
        }
        Ok(value)
    }
}

fn parse_row(text: &str, line: usize) -> Result<[f64; VALUES_PER_PARTICLE]> {
    let mut row = [0.0; VALUES_PER_PARTICLE];
    let mut count = 0;
    for field in text.split_whitespace() {
        if count == VALUES_PER_PARTICLE {
            return Err(TrajectoryError::format(
                line,
                format!("more than {VALUES_PER_PARTICLE} values"),
            ));
        }
        row[count] = field
            .parse()
            .map_err(|e| TrajectoryError::format(line, format!("bad number {field:?}: {e}")))?;
        count += 1;
    }
    if count != VALUES_PER_PARTICLE {
        return Err(TrajectoryError::format(
            line,
            format!("expected {VALUES_PER_PARTICLE} values, found {count}"),
        ));
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxtraj_core::TrajectoryStore;

    fn sample() -> Trajectory {
        let params = SimulationParameters::new(2, 10.0, 2, 0.01).unwrap();
        let mut store = TrajectoryStore::new(params);
        store
            .record_step(0, &[[1.5, 2.0, 9.75], [0.1, 0.2, 0.3]], &[[1.0, -2.5, 3.0], [0.0, 0.0, -4.125]])
            .unwrap();
        store
            .record_step(1, &[[10.2, -0.05, 1e-9], [5.0, 5.0, 5.0]], &[[-1.0, 2.5, 3.0], [1.0 / 3.0, 0.0, 0.0]])
            .unwrap();
        store.finish().unwrap()
    }

    #[test]
    fn test_layout() {
        let params = SimulationParameters::new(1, 1.0, 2, 1.0).unwrap();
        let mut store = TrajectoryStore::new(params);
        store.record_step(0, &[[0.5, 0.5, 0.5]], &[[0.0; 3]]).unwrap();
        store.record_step(1, &[[0.25, 0.5, 0.75]], &[[1.0, -1.0, 2.0]]).unwrap();
        let text = serialize(&store.finish().unwrap());

        let expected = "1\n1.0\n2\n1.0\n\n0.5 0.5 0.5 0.0 0.0 0.0\n\n0.25 0.5 0.75 1.0 -1.0 2.0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_reals_always_carry_point_or_exponent() {
        let params = SimulationParameters::new(1, 10.0, 1, 0.01).unwrap();
        let mut store = TrajectoryStore::new(params);
        store.record_step(0, &[[1e-9, 2.0, 1e21]], &[[-3.0, 0.5, 0.0]]).unwrap();
        let text = serialize(&store.finish().unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "10.0");
        assert_eq!(lines[3], "0.01");
        assert_eq!(lines[5], "1e-9 2.0 1e21 -3.0 0.5 0.0");
    }

    #[test]
    fn test_round_trip_exact() {
        let traj = sample();
        let back = deserialize(&serialize(&traj)).unwrap();
        assert_eq!(back, traj);
        assert_eq!(back.velocities_at(1).unwrap()[1][0], 1.0 / 3.0);
    }

    #[test]
    fn test_write_matches_serialize() {
        let traj = sample();
        let mut buf = Vec::new();
        write_trajectory(&traj, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), serialize(&traj));
    }

    #[test]
    fn test_reads_integer_reals_and_crlf() {
        // Header reals written without a decimal point, Windows line endings
        let text = "1\r\n10\r\n1\r\n0.01\r\n\r\n1 2 3 4 5 6\r\n";
        let traj = deserialize(text).unwrap();
        assert_eq!(traj.box_width(), 10.0);
        assert_eq!(traj.time_step_seconds(), 0.01);
        assert_eq!(traj.frame_at(0).unwrap(), vec![[1.0, 2.0, 3.0]]);
        assert_eq!(traj.velocities_at(0).unwrap(), vec![[4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_delimiter_content_ignored() {
        let text = "1\n1.0\n2\n1.0\nstep 0\n1 1 1 0 0 0\n   \n2 2 2 0 0 0\n";
        let traj = deserialize(text).unwrap();
        assert_eq!(traj.frame_at(1).unwrap(), vec![[2.0, 2.0, 2.0]]);
    }

    #[test]
    fn test_trailing_content_ignored() {
        let text = "1\n1.0\n1\n1.0\n\n1 1 1 0 0 0\n\ngarbage\n";
        assert_eq!(deserialize(text).unwrap().step_count(), 1);
    }

    #[test]
    fn test_truncated_body() {
        // Header promises 5 steps, only 2 blocks present
        let text = "1\n1.0\n5\n0.1\n\n1 1 1 0 0 0\n\n1 1 1 0 0 0\n";
        let err = deserialize(text).unwrap_err();
        assert!(err.is_format(), "{err}");
        assert!(matches!(err, TrajectoryError::Format { line: 9, .. }), "{err}");
    }

    #[test]
    fn test_truncated_inside_block() {
        let text = "2\n1.0\n1\n0.1\n\n1 1 1 0 0 0\n";
        let err = deserialize(text).unwrap_err();
        assert!(matches!(err, TrajectoryError::Format { line: 7, .. }), "{err}");
    }

    #[test]
    fn test_bad_header() {
        for text in ["", "two\n1.0\n1\n1.0\n", "1\nwide\n1\n1.0\n", "1\n1.0\n1.5\n1.0\n", "1\n1.0\n1\n\n"] {
            let err = deserialize(text).unwrap_err();
            assert!(err.is_format(), "{text:?}: {err}");
        }
    }

    #[test]
    fn test_header_values_must_be_positive() {
        let cases = [
            ("0\n1.0\n1\n1.0\n", 1),
            ("1\n-1\n1\n1.0\n", 2),
            ("1\ninf\n1\n1.0\n", 2),
            ("1\n1.0\n0\n1.0\n", 3),
            ("1\n1.0\n1\n0\n", 4),
        ];
        for (text, bad_line) in cases {
            match deserialize(text).unwrap_err() {
                TrajectoryError::Format { line, .. } => assert_eq!(line, bad_line, "{text:?}"),
                other => panic!("{text:?}: {other}"),
            }
        }
    }

    #[test]
    fn test_header_counts_overflowing_buffer() {
        let text = format!("{}\n1.0\n2\n1.0\n", usize::MAX);
        let err = deserialize(&text).unwrap_err();
        assert!(matches!(err, TrajectoryError::Format { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_body_line_value_count() {
        let short = "1\n1.0\n1\n1.0\n\n1 2 3 4 5\n";
        let long = "1\n1.0\n1\n1.0\n\n1 2 3 4 5 6 7\n";
        let junk = "1\n1.0\n1\n1.0\n\n1 2 3 x 5 6\n";
        for text in [short, long, junk] {
            let err = deserialize(text).unwrap_err();
            assert!(matches!(err, TrajectoryError::Format { line: 6, .. }), "{text:?}: {err}");
        }
    }

    #[test]
    fn test_body_line_not_utf8() {
        let bytes: &[u8] = b"1\n1.0\n1\n1.0\n\n1 2 3 4 5 \xff\n";
        let err = read_trajectory(bytes).unwrap_err();
        assert!(matches!(err, TrajectoryError::Format { line: 6, .. }), "{err}");
    }

    #[test]
    fn test_tabs_and_extra_spaces_between_values() {
        let text = "1\n1.0\n1\n1.0\n\n  1\t2   3 4 5 6  \n";
        let traj = deserialize(text).unwrap();
        assert_eq!(traj.velocities_at(0).unwrap(), vec![[4.0, 5.0, 6.0]]);
    }
}
