use clap::{Parser, Subcommand};

use self::{
    check_config::CheckConfigArg, record::RecordArg, replay::ReplayArg, simulate::SimulateArg,
};

mod check_config;
mod record;
mod replay;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games with an automated player and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Play one game with an automated player and save its input log
    Record(#[clap(flatten)] RecordArg),
    /// Re-run a recording and check that it reproduces its final state
    Replay(#[clap(flatten)] ReplayArg),
    /// Load and validate an engine configuration file
    CheckConfig(#[clap(flatten)] CheckConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Record(arg) => record::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::CheckConfig(arg) => check_config::run(&arg)?,
    }
    Ok(())
}
