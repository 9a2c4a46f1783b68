use std::time::Duration;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use statusbridge_adapters::cachet::CachetConfig;

/// Bridges Prometheus Alertmanager webhooks to Cachet incidents.
#[derive(Debug, Clone, Parser)]
#[command(name = "statusbridge", version, about)]
pub struct Config {
    /// Base URL of the Cachet installation.
    #[arg(long, env = "CACHET_URL", value_parser = NonEmptyStringValueParser::new())]
    pub cachet_url: String,

    /// Cachet API token.
    #[arg(
        long,
        env = "CACHET_KEY",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub cachet_key: String,

    /// debug, info, warn or error. Anything else falls back to info.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "PORT", default_value_t = 80)]
    pub port: u16,

    #[arg(long, env = "CACHET_TIMEOUT_SECS", default_value_t = 30)]
    pub cachet_timeout_secs: u64,
}

impl Config {
    pub fn cachet(&self) -> CachetConfig {
        CachetConfig {
            base_url: self.cachet_url.clone(),
            api_token: self.cachet_key.clone(),
            timeout: Duration::from_secs(self.cachet_timeout_secs),
        }
    }
}
