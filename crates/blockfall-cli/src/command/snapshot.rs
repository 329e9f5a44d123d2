use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::Context as _;
use blockfall_engine::{GameSession, SessionSnapshot};

use crate::config::SessionArgs;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SnapshotArg {
    #[clap(flatten)]
    session: SessionArgs,
    /// Hard drops to perform before taking the snapshot
    #[clap(long, default_value_t = 0)]
    hard_drops: usize,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SnapshotArg) -> anyhow::Result<()> {
    let SnapshotArg {
        session,
        hard_drops,
        output,
    } = arg;

    let snapshot = take_snapshot(GameSession::new(session.load()?), *hard_drops);
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), &snapshot)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            eprintln!("Snapshot written to {}", path.display());
        }
        None => write_json(io::stdout().lock(), &snapshot)
            .context("Failed to write JSON to stdout")?,
    }
    Ok(())
}

/// Starts `session` and hard-drops up to `hard_drops` pieces, stopping at game over.
fn take_snapshot(mut session: GameSession, hard_drops: usize) -> SessionSnapshot {
    session.start();
    for _ in 0..hard_drops {
        if session.hard_drop().is_err() {
            break;
        }
    }
    session.snapshot()
}

fn write_json<W>(mut writer: W, snapshot: &SessionSnapshot) -> anyhow::Result<()>
where
    W: io::Write,
{
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
