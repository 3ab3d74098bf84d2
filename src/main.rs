use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::{AdaptiveFormat, Logger};

use othello_agents::ai::{load_or_train, Agent, AgentKind, AlphaBetaAgent, MinimaxAgent};
use othello_agents::config::AppConfig;
use othello_agents::game::Player;
use othello_agents::training::episode::{play_match, play_match_with, MatchReport};

/// Play Othello between automated agents.
#[derive(Parser)]
#[command(name = "othello", about = "Othello engine with search and learning agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game and print the board after every ply
    Play {
        #[arg(long, value_enum, default_value = "minimax")]
        dark: AgentKind,

        #[arg(long, value_enum, default_value = "alphabeta")]
        light: AgentKind,

        /// Override the search depth of both search agents
        #[arg(long)]
        depth: Option<usize>,

        /// Override the trainer seed used when a Q table must be trained
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Compare the agents across search depths
    Bench {
        /// Override the configured depth levels
        #[arg(long, value_delimiter = ',')]
        levels: Option<Vec<usize>>,

        /// Override the number of episodes used when a Q table must be trained
        #[arg(long)]
        episodes: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str(&cli.log_level)
        .context("parsing log level")?
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::Default)
        .start()
        .context("starting logger")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            dark,
            light,
            depth,
            seed,
        } => {
            if let Some(depth) = depth {
                config.search.minimax_depth = depth;
                config.search.alphabeta_depth = depth;
            }
            if seed.is_some() {
                config.training.seed = seed;
            }
            config.validate().context("invalid configuration")?;
            run_play(dark, light, &config)
        }
        Command::Bench { levels, episodes } => {
            if let Some(levels) = levels {
                config.bench.levels = levels;
            }
            if let Some(episodes) = episodes {
                config.training.num_episodes = episodes;
            }
            config.validate().context("invalid configuration")?;
            run_bench(&config)
        }
    }
}

fn run_play(dark: AgentKind, light: AgentKind, config: &AppConfig) -> Result<()> {
    let mut dark_agent = dark
        .build(Player::Dark, config)
        .context("preparing dark agent")?;
    let mut light_agent = light
        .build(Player::Light, config)
        .context("preparing light agent")?;

    println!("{} (DARK) vs {} (LIGHT)\n", dark_agent.name(), light_agent.name());

    let report = play_match_with(dark_agent.as_mut(), light_agent.as_mut(), |mover, state| {
        let score = state.score();
        println!("{} moved  (D {} - L {})", mover.name(), score.dark, score.light);
        println!("{}", state);
    })
    .context("playing game")?;

    println!(
        "Result: {}  DARK {} - LIGHT {}  ({} plies)",
        report.winner_label(),
        report.score.dark,
        report.score.light,
        report.plies
    );
    println!(
        "Time: DARK {:.3}s, LIGHT {:.3}s  Nodes: DARK {}, LIGHT {}",
        report.dark_time.as_secs_f64(),
        report.light_time.as_secs_f64(),
        report.dark_nodes,
        report.light_nodes
    );
    Ok(())
}

fn run_bench(config: &AppConfig) -> Result<()> {
    let learner = load_or_train(Player::Light, config).with_context(|| {
        format!("preparing Q table at {}", config.table.path.display())
    })?;

    println!("| Level | Dark | Light | Winner | Score | Dark time (s) | Light time (s) | Dark nodes | Light nodes |");
    println!("|---|---|---|---|---|---|---|---|---|");

    for &level in &config.bench.levels {
        let pairings: [(Box<dyn Agent>, Box<dyn Agent>); 3] = [
            (
                Box::new(MinimaxAgent::new(Player::Dark, level)),
                Box::new(AlphaBetaAgent::new(Player::Light, level)),
            ),
            (
                Box::new(AlphaBetaAgent::new(Player::Dark, level)),
                learner.clone_agent(),
            ),
            (
                Box::new(MinimaxAgent::new(Player::Dark, level)),
                learner.clone_agent(),
            ),
        ];

        for (mut dark, mut light) in pairings {
            log::info!("level {}: {} vs {}", level, dark.name(), light.name());
            let report = play_match(dark.as_mut(), light.as_mut())
                .with_context(|| format!("{} vs {} at level {}", dark.name(), light.name(), level))?;
            print_row(level, dark.name(), light.name(), &report);
        }
    }
    Ok(())
}

fn print_row(level: usize, dark: &str, light: &str, report: &MatchReport) {
    println!(
        "| {} | {} | {} | {} | {}-{} | {:.3} | {:.3} | {} | {} |",
        level,
        dark,
        light,
        report.winner_label(),
        report.score.dark,
        report.score.light,
        report.dark_time.as_secs_f64(),
        report.light_time.as_secs_f64(),
        report.dark_nodes,
        report.light_nodes
    );
}
