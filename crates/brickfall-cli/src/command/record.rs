use std::path::PathBuf;

use brickfall_engine::BrickSeed;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    player::{PlayerStyle, RandomPlayer},
    record::RecordingController,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RecordArg {
    /// Seed (32 hex digits) for a reproducible run
    #[arg(long, value_parser = BrickSeed::from_hex)]
    seed: Option<BrickSeed>,
    /// Stop the game after this many bricks have locked
    #[arg(long, default_value_t = 1000)]
    max_bricks: usize,
    /// Engine configuration file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// How the automated player chooses its inputs
    #[arg(long, default_value = "random")]
    player: PlayerStyle,
    /// Let the player buy and activate power-ups when it can afford them
    #[arg(long)]
    buy_power_ups: bool,
    /// Path to write the recording to (JSON format)
    #[arg(long)]
    output: PathBuf,
}

pub(crate) fn run(arg: &RecordArg) -> anyhow::Result<()> {
    let config = util::load_config(arg.config.as_deref())?;
    let mut rng = util::master_rng(arg.seed);
    let seed: BrickSeed = rng.random();

    let mut recorder = RecordingController::new(config, seed)?;
    let mut player = RandomPlayer::new(Pcg32::from_rng(&mut rng), arg.player, arg.buy_power_ups);
    while recorder.session_state().is_playing()
        && recorder.stats().completed_bricks() < arg.max_bricks
    {
        let input = player.next_input(&*recorder);
        recorder.apply(input);
    }

    let recording = recorder.into_recording(arg.player);
    eprintln!(
        "Recorded {} inputs: score {}, {} bricks, {} lines",
        recording.inputs.len(),
        recording.final_score,
        recording.final_stats.completed_bricks(),
        recording.final_stats.total_cleared_lines(),
    );

    let mut output = Output::open(arg.output.clone())?;
    output.write_json(&recording)?;
    eprintln!("Saved recording to {}", output.display_path());
    Ok(())
}
