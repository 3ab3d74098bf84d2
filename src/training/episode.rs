use std::time::Duration;

use crate::ai::{Agent, QLearningAgent, RandomAgent};
use crate::error::TrainingError;
use crate::game::{GameOutcome, GameState, Player, Score};
use crate::training::metrics::EpisodeResult;

/// Side that actually moves next: the side whose turn it is, or its opponent
/// when the former must pass. `None` once the game is over.
pub fn next_mover(state: &GameState) -> Option<Player> {
    let turn = state.turn();
    if state.has_legal_move(turn) {
        Some(turn)
    } else if state.has_legal_move(turn.opponent()) {
        Some(turn.opponent())
    } else {
        None
    }
}

/// Play one training game from the opening. The learner updates its table
/// after each of its own plies; the opponent moves uniformly at random.
pub fn play_training_episode(
    agent: &mut QLearningAgent,
    opponent: &mut RandomAgent,
) -> Result<EpisodeResult, TrainingError> {
    let side = agent.side();
    let mut state = GameState::initial();
    let mut plies = 0;

    while let Some(mover) = next_mover(&state) {
        if mover == side {
            let prior = state.duplicate();
            let action = agent
                .select_action(&state)
                .ok_or_else(|| TrainingError::NoMoveProposed {
                    agent: agent.name().to_string(),
                    side: mover,
                })?;
            state
                .apply(action, side)
                .map_err(|source| TrainingError::IllegalMove {
                    agent: agent.name().to_string(),
                    source,
                })?;
            let reward = agent.reward(&state);
            agent.learn(&prior, action, reward, &state);
        } else {
            let mv = opponent
                .choose(&state)
                .ok_or_else(|| TrainingError::NoMoveProposed {
                    agent: opponent.name().to_string(),
                    side: mover,
                })?;
            state
                .apply(mv, mover)
                .map_err(|source| TrainingError::IllegalMove {
                    agent: opponent.name().to_string(),
                    source,
                })?;
        }
        plies += 1;
    }

    Ok(EpisodeResult {
        winner: winner_of(&state),
        plies,
        final_score: state.score(),
    })
}

fn winner_of(state: &GameState) -> Option<Player> {
    match state.outcome() {
        Some(GameOutcome::Winner(p)) => Some(p),
        _ => None,
    }
}

/// Summary of one game between two agents.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub score: Score,
    pub winner: Option<Player>,
    pub plies: usize,
    pub dark_time: Duration,
    pub light_time: Duration,
    pub dark_nodes: u64,
    pub light_nodes: u64,
}

impl MatchReport {
    pub fn winner_label(&self) -> &'static str {
        match self.winner {
            Some(Player::Dark) => "DARK",
            Some(Player::Light) => "LIGHT",
            None => "DRAW",
        }
    }
}

/// Play a full game between two agents, passing whenever the side to move
/// has no legal move. `on_ply` sees the state after every placement.
pub fn play_match_with(
    dark: &mut dyn Agent,
    light: &mut dyn Agent,
    mut on_ply: impl FnMut(Player, &GameState),
) -> Result<MatchReport, TrainingError> {
    for (agent, expected) in [(&*dark, Player::Dark), (&*light, Player::Light)] {
        if agent.side() != expected {
            return Err(TrainingError::SideMismatch {
                agent: agent.name().to_string(),
                expected,
            });
        }
    }

    let mut state = GameState::initial();
    let mut report = MatchReport {
        score: state.score(),
        winner: None,
        plies: 0,
        dark_time: Duration::ZERO,
        light_time: Duration::ZERO,
        dark_nodes: 0,
        light_nodes: 0,
    };

    while let Some(mover) = next_mover(&state) {
        let agent: &mut dyn Agent = match mover {
            Player::Dark => &mut *dark,
            Player::Light => &mut *light,
        };
        let decision = agent.propose_move(&state);
        match mover {
            Player::Dark => {
                report.dark_time += decision.elapsed;
                report.dark_nodes += decision.nodes_expanded;
            }
            Player::Light => {
                report.light_time += decision.elapsed;
                report.light_nodes += decision.nodes_expanded;
            }
        }

        let mv = decision.mv.ok_or_else(|| TrainingError::NoMoveProposed {
            agent: agent.name().to_string(),
            side: mover,
        })?;
        state
            .apply(mv, mover)
            .map_err(|source| TrainingError::IllegalMove {
                agent: agent.name().to_string(),
                source,
            })?;
        report.plies += 1;
        on_ply(mover, &state);
    }

    report.score = state.score();
    report.winner = winner_of(&state);
    Ok(report)
}

/// Play a full game between two agents.
pub fn play_match(
    dark: &mut dyn Agent,
    light: &mut dyn Agent,
) -> Result<MatchReport, TrainingError> {
    play_match_with(dark, light, |_, _| {})
}

/// Greedy win rate of `agent` against a fresh random opponent over `games` games.
pub fn evaluate(agent: &mut QLearningAgent, games: usize) -> Result<f32, TrainingError> {
    let mut random = RandomAgent::new(agent.side().opponent());
    evaluate_against(agent, &mut random, games)
}

/// Greedy win rate of `agent` against `random` over `games` games.
pub fn evaluate_against(
    agent: &mut QLearningAgent,
    random: &mut RandomAgent,
    games: usize,
) -> Result<f32, TrainingError> {
    if games == 0 {
        return Ok(0.0);
    }
    let side = agent.side();

    let saved = agent.exploration();
    agent.set_exploration(0.0);

    let mut wins = 0;
    let mut outcome = Ok(());
    for _ in 0..games {
        let report = match side {
            Player::Dark => play_match(&mut *agent, &mut *random),
            Player::Light => play_match(&mut *random, &mut *agent),
        };
        match report {
            Ok(r) if r.winner == Some(side) => wins += 1,
            Ok(_) => {}
            Err(e) => {
                outcome = Err(e);
                break;
            }
        }
    }

    agent.set_exploration(saved); // restore
    outcome.map(|()| wins as f32 / games as f32)
}
