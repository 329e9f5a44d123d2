use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use blockfall_engine::SessionConfig;

/// Session settings shared by every subcommand.
///
/// Values given on the command line override the config file.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArgs {
    /// TOML file with session settings
    #[clap(long)]
    config: Option<PathBuf>,
    /// Gravity period in milliseconds
    #[clap(long)]
    drop_interval_ms: Option<u64>,
    /// Seed for the piece sequence (every game deals the same pieces)
    #[clap(long)]
    seed: Option<u64>,
}

impl SessionArgs {
    pub(crate) fn load(&self) -> anyhow::Result<SessionConfig> {
        let config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => SessionConfig::default(),
        };
        let config = self.apply_overrides(config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(millis) = self.drop_interval_ms {
            config.drop_interval = Duration::from_millis(millis);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<SessionConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_config(contents: &str) -> Result<SessionConfig, toml::de::Error> {
    toml::from_str(contents)
}
