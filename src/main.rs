use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use torus_snake::game::GameConfig;
use torus_snake::logging;
use torus_snake::modes::PlayMode;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrapping grid, in your terminal")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Snake moves per second
    #[arg(long)]
    speed: Option<u32>,

    /// Seed for apple placement and starting directions
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;
    let config = cli.game_config().context("Invalid game configuration")?;
    tracing::info!(?config, "starting");

    let mut play_mode = PlayMode::new(config)?;
    play_mode.run().await?;

    Ok(())
}
