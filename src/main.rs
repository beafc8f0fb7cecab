use std::path::PathBuf;

use anyhow::{Context, Result};
use boxtraj_core::SimConfig;
use boxtraj_physics::boundary;
use boxtraj_sim::Generator;
use boxtraj_storage::{save_checkpoint, save_trajectory};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a particle trajectory in a reflecting box and write it as text
#[derive(Parser, Debug)]
#[command(name = "boxtraj", version)]
struct Args {
    /// TOML run configuration; defaults are used for missing keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output trajectory file
    #[arg(short, long, default_value = "system.txt")]
    output: PathBuf,

    /// Override the RNG seed from the config
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a bincode checkpoint here
    #[arg(long)]
    checkpoint: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let trajectory = Generator::from_config(&config)?.run()?;
    info!(
        max_excursion = boundary::max_excursion(&trajectory),
        frames_outside = boundary::frames_outside(&trajectory),
        "boundary check"
    );

    // Nothing touches the disk until the run has fully completed
    save_trajectory(&trajectory, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    if let Some(path) = &args.checkpoint {
        save_checkpoint(&trajectory, path)
            .with_context(|| format!("writing checkpoint {}", path.display()))?;
    }

    Ok(())
}
