use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrapping grid")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square board (snake and food are re-centered)
    #[arg(long)]
    board_size: Option<usize>,

    /// Milliseconds between game steps
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Minimum drag distance, in pixels, for a swipe
    #[arg(long)]
    swipe_threshold: Option<f32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore direction changes straight back into the snake's neck
    #[arg(long)]
    strict_reversal: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.board_size {
            let resized = GameConfig::with_board_size(size);
            config.board_size = resized.board_size;
            config.initial_head = resized.initial_head;
            config.initial_food = resized.initial_food;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(threshold) = self.swipe_threshold {
            config.swipe_threshold = threshold;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.strict_reversal {
            config.allow_reversal = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_file.as_deref())?;

    let config = cli.game_config().context("Invalid game configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

/// Logs go to a file when one is given and are dropped otherwise
fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
