use std::path::PathBuf;

use anyhow::Context as _;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "blockfall.log";
const DEFAULT_DIRECTIVE: &str = "blockfall=info";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LogArgs {
    /// Directory for the log file [default: <temp dir>/blockfall]
    #[clap(long, global = true)]
    log_dir: Option<PathBuf>,
}

impl LogArgs {
    fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("blockfall"))
    }
}

/// Installs a subscriber writing to a file, leaving the terminal to the game.
///
/// Events are dropped once the returned guard goes out of scope.
pub(crate) fn init(args: &LogArgs) -> anyhow::Result<WorkerGuard> {
    let log_dir = args.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter()?)
        .with_ansi(false)
        .init();

    tracing::info!(log = %log_dir.join(LOG_FILE).display(), "logging started");
    Ok(guard)
}

/// `RUST_LOG` when set, otherwise [`DEFAULT_DIRECTIVE`].
fn env_filter() -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_DIRECTIVE.parse()?)
        .from_env_lossy();
    Ok(filter)
}
