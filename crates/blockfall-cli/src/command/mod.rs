use clap::{Parser, Subcommand};

use crate::logging::{self, LogArgs};

use self::{play::PlayArg, snapshot::SnapshotArg};

mod play;
mod snapshot;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    log: LogArgs,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print a JSON snapshot of a freshly started session
    Snapshot(#[clap(flatten)] SnapshotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let _guard = logging::init(&args.log)?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Snapshot(arg) => snapshot::run(&arg)?,
    }
    Ok(())
}
