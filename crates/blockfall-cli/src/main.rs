mod command;
mod config;
mod logging;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
