use std::path::PathBuf;

use brickfall_engine::{BrickSeed, EngineConfig, GameController};
use chrono::Utc;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    player::{self, PlayerStyle, RandomPlayer},
    schema::report::{GameSummary, SimulationReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Stop a game after this many bricks have locked
    #[arg(long, default_value_t = 1000)]
    max_bricks: usize,
    /// Seed (32 hex digits) for a reproducible run
    #[arg(long, value_parser = BrickSeed::from_hex)]
    seed: Option<BrickSeed>,
    /// Engine configuration file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// How the automated player chooses its inputs
    #[arg(long, default_value = "random")]
    player: PlayerStyle,
    /// Let the player buy and activate power-ups when it can afford them
    #[arg(long)]
    buy_power_ups: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = util::load_config(arg.config.as_deref())?;
    let mut rng = util::master_rng(arg.seed);

    let mut games = Vec::with_capacity(arg.games);
    for i in 0..arg.games {
        let summary = simulate_game(&config, arg, &mut rng)?;
        eprintln!(
            "Game #{i}: score {}, {} bricks, {} lines{}",
            summary.score,
            summary.stats.completed_bricks(),
            summary.stats.total_cleared_lines(),
            if summary.game_over { ", game over" } else { "" },
        );
        games.push(summary);
    }

    #[expect(clippy::cast_precision_loss)]
    let mean_score = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| g.score as f64).sum::<f64>() / games.len() as f64
    };
    eprintln!("Mean score: {mean_score:.1}");

    let report = SimulationReport {
        created_at: Utc::now(),
        config,
        player: arg.player,
        buy_power_ups: arg.buy_power_ups,
        max_bricks: arg.max_bricks,
        mean_score,
        games,
    };
    Output::save_json(&report, arg.output.clone())
}

fn simulate_game(
    config: &EngineConfig,
    arg: &SimulateArg,
    rng: &mut Pcg32,
) -> anyhow::Result<GameSummary> {
    let seed: BrickSeed = rng.random();
    let mut game = GameController::with_seed(config, seed)?;
    let mut player = RandomPlayer::new(
        Pcg32::from_rng(rng),
        arg.player,
        arg.buy_power_ups,
    );
    player::play_game(&mut game, &mut player, arg.max_bricks, |_| {});

    Ok(GameSummary {
        seed,
        score: game.score(),
        skill_points: game.skill_points(),
        game_over: game.session_state().is_game_over(),
        stats: game.stats().clone(),
    })
}
