//! Headless playback: load a trajectory file and walk it frame by frame,
//! the way a visualizer's timer would.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use boxtraj_physics::boundary;
use boxtraj_sim::PlaybackCursor;
use boxtraj_storage::{load_checkpoint, load_trajectory};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "replay", version, about = "Replay a recorded trajectory")]
struct Args {
    /// Trajectory file (text format unless --checkpoint)
    input: PathBuf,

    /// Input is a bincode checkpoint
    #[arg(long)]
    checkpoint: bool,

    /// Frames to play; defaults to one full pass
    #[arg(short, long)]
    frames: Option<usize>,

    /// Start frame
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Sleep one time step between frames
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let trajectory = if args.checkpoint {
        load_checkpoint(&args.input)
    } else {
        load_trajectory(&args.input)
    }
    .with_context(|| format!("loading {}", args.input.display()))?;

    let trajectory = Arc::new(trajectory);
    let mut cursor = PlaybackCursor::new(Arc::clone(&trajectory));
    cursor.seek(args.start)?;

    let frames = args.frames.unwrap_or(trajectory.step_count());
    ensure!(frames > 0, "nothing to play");
    info!(
        particles = trajectory.particle_count(),
        steps = trajectory.step_count(),
        box_width = trajectory.box_width(),
        interval_ms = cursor.frame_interval().as_secs_f64() * 1000.0,
        frames,
        "starting playback"
    );

    let w = trajectory.box_width();
    let mut worst = 0.0f64;
    let mut frame = cursor.current_frame()?;
    for played in 0..frames {
        let excursion = boundary::frame_excursion(&frame, w);
        worst = worst.max(excursion);
        debug!(frame = cursor.current_index(), excursion, "frame");

        if played + 1 < frames {
            if args.realtime {
                std::thread::sleep(cursor.frame_interval());
            }
            frame = cursor.tick()?;
        }
    }

    info!(
        last_frame = cursor.current_index(),
        max_excursion = worst,
        "playback finished"
    );
    Ok(())
}
