//! Simulated host configuration.
use std::env;
use std::path::PathBuf;

/// Configuration for one simulated server session.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Startup config file (TOML or JSON).
    pub config_path: Option<PathBuf>,
    pub rounds: u32,
    pub players: u32,
    /// Ticks a round lasts after skills are handed out.
    pub round_ticks: u64,
    /// Wall-clock length of one tick.
    pub tick_millis: u64,
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            rounds: 5,
            players: 4,
            round_ticks: 128,
            tick_millis: 1,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ROULETTE_CONFIG` - Startup config file (default: built-in weights)
    /// - `ROULETTE_ROUNDS` - Rounds to simulate (default: 5)
    /// - `ROULETTE_PLAYERS` - Simulated players (default: 4)
    /// - `ROULETTE_ROUND_TICKS` - Ticks of combat per round (default: 128)
    /// - `ROULETTE_TICK_MS` - Milliseconds per tick (default: 1)
    /// - `ROULETTE_LOG_DIR` - Also write `server.log` here (default: stderr only)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.config_path = env::var("ROULETTE_CONFIG").ok().map(PathBuf::from);

        if let Some(rounds) = read_env::<u32>("ROULETTE_ROUNDS") {
            config.rounds = rounds;
        }

        if let Some(players) = read_env::<u32>("ROULETTE_PLAYERS") {
            config.players = players;
        }

        if let Some(ticks) = read_env::<u64>("ROULETTE_ROUND_TICKS") {
            config.round_ticks = ticks.max(1);
        }

        if let Some(millis) = read_env::<u64>("ROULETTE_TICK_MS") {
            config.tick_millis = millis.max(1);
        }

        config.log_dir = env::var("ROULETTE_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
