//! Server configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings the server needs before content is loaded.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub content_dir: PathBuf,
    pub tick_interval: Duration,
    /// Enables the file log layer when set.
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub const DEFAULT_CONTENT_DIR: &'static str = "crates/game/content/data";
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Directory holding config.toml, skills.ron, tribes.ron
    /// - `TICK_INTERVAL_MS` - Wall-clock tick period (default: 100)
    /// - `LOG_DIR` - Directory for the server log file (default: stderr only)
    pub fn from_env() -> Self {
        let content_dir = env::var_os("CONTENT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONTENT_DIR));
        let tick_interval_ms = read_env::<u64>("TICK_INTERVAL_MS")
            .unwrap_or(Self::DEFAULT_TICK_INTERVAL_MS)
            .max(1);

        Self {
            content_dir,
            tick_interval: Duration::from_millis(tick_interval_ms),
            log_dir: env::var_os("LOG_DIR").map(PathBuf::from),
        }
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}
