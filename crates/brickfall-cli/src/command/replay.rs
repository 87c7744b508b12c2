use std::path::PathBuf;

use anyhow::{Context as _, ensure};

use crate::{record, schema::record::RecordedSession, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    pub(crate) recording_file: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { recording_file } = arg;

    eprintln!("Loading recording from {}", recording_file.display());
    let recording: RecordedSession = util::read_json_file("recording", recording_file)?;
    eprintln!(
        "Loaded {} inputs recorded at {}",
        recording.inputs.len(),
        recording.recorded_at
    );

    let game = record::replay(&recording)
        .with_context(|| format!("Invalid configuration in {}", recording_file.display()))?;

    ensure!(
        game.score() == recording.final_score,
        "Replay diverged: score {} != recorded score {}",
        game.score(),
        recording.final_score
    );
    ensure!(
        game.stats() == &recording.final_stats,
        "Replay diverged: stats {:?} != recorded stats {:?}",
        game.stats(),
        recording.final_stats
    );

    eprintln!(
        "Replay matches: score {}, {} bricks, {} lines, {} bombs",
        game.score(),
        game.stats().completed_bricks(),
        game.stats().total_cleared_lines(),
        game.stats().bombs_detonated(),
    );
    Ok(())
}
