use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Where diagnostic log lines are written. Hosted environments that collect
/// stdout (e.g. CloudWatch) use `Stdout`; interactive use favors `Stderr`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractorConfig {
    pub log_level: String,
    pub log_target: LogTarget,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_target: LogTarget::Stdout,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("log_level", "info")?
            .set_default("log_target", "stdout")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("EXTRACTOR"))
            .build()?;

        s.try_deserialize()
    }
}

/// Install the process logger according to `config`. Idempotent: when a
/// logger is already installed the existing one is left in place.
pub fn init_logging(config: &ExtractorConfig) {
    let target = match config.log_target {
        LogTarget::Stdout => env_logger::Target::Stdout,
        LogTarget::Stderr => env_logger::Target::Stderr,
    };

    let _ = env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .target(target)
        .try_init();
}
