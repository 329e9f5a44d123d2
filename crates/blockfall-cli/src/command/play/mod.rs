use blockfall_engine::GameSession;

use crate::{command::play::app::PlayApp, config::SessionArgs, tui::Tui};

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArgs,
    /// Hide the landing preview of the active piece
    #[clap(long)]
    no_ghost: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session, no_ghost } = arg;

    let session = GameSession::new(session.load()?);
    let config = session.config();
    tracing::info!(
        drop_interval_ms = config.drop_interval.as_millis(),
        seed = ?config.seed,
        "session configured"
    );
    let mut app = PlayApp::new(session, !*no_ghost);
    Tui::new().run(&mut app)?;

    let score = app.final_score();
    tracing::info!(score, "exiting");
    println!("Score: {score}");
    Ok(())
}
