use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger};

use othello_agents::ai::QLearningAgent;
use othello_agents::config::AppConfig;
use othello_agents::error::CheckpointError;
use othello_agents::game::Player;
use othello_agents::training::trainer::Trainer;

#[derive(Clone, Copy, clap::ValueEnum)]
enum Side {
    Dark,
    Light,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Dark => Player::Dark,
            Side::Light => Player::Light,
        }
    }
}

/// Train a tabular Q-learning Othello agent against a random opponent.
#[derive(Parser)]
#[command(name = "train", about = "Train a Q-learning Othello agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Side the agent learns to play
    #[arg(long, value_enum, default_value = "light")]
    side: Side,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the table path
    #[arg(long)]
    table: Option<PathBuf>,

    /// Continue from the existing table instead of starting empty
    #[arg(long)]
    resume: bool,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let _logger = Logger::try_with_env_or_str(&cli.log_level)
        .context("parsing log level")?
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::Default)
        .start()
        .context("starting logger")?;

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(episodes) = cli.episodes {
        app_config.training.num_episodes = episodes;
    }
    if cli.seed.is_some() {
        app_config.training.seed = cli.seed;
    }
    if let Some(table) = cli.table {
        app_config.table.path = table;
    }
    app_config.validate().context("invalid configuration")?;

    let side = Player::from(cli.side);
    let mut agent = match app_config.training.seed {
        Some(seed) => QLearningAgent::with_seed(side, app_config.qlearning, seed),
        None => QLearningAgent::new(side, app_config.qlearning),
    };

    let table_path = &app_config.table.path;
    if cli.resume {
        match agent.load(table_path) {
            Ok(()) => {}
            Err(CheckpointError::NotFound(_)) => {
                log::warn!("no table at {}, starting fresh", table_path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("resuming from {}", table_path.display()));
            }
        }
    }

    let trainer = Trainer::new(app_config.training.clone());
    let metrics = trainer.train(&mut agent).context("training")?;

    agent
        .save(table_path)
        .with_context(|| format!("saving table to {}", table_path.display()))?;

    let window = app_config.training.log_interval;
    println!(
        "Trained {} episodes as {} ({} in total). Last {}: win {:.1}%, draw {:.1}%, loss {:.1}%. Table: {} entries -> {}",
        metrics.total_episodes(),
        side.name(),
        agent.episodes_trained(),
        window,
        metrics.win_rate(window) * 100.0,
        metrics.draw_rate(window) * 100.0,
        metrics.loss_rate(window) * 100.0,
        agent.table().len(),
        table_path.display()
    );
    Ok(())
}
