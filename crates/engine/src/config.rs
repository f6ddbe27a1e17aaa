use std::time::{SystemTime, UNIX_EPOCH};

use tile_pop_core::GridConfig;

use crate::types::{COLLECT_PAUSE_MS, REGEN_PAUSE_MS};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub grid: GridConfig,
    /// Pause between a successful collect and the refill
    pub collect_pause_ms: u32,
    /// Pause between regeneration attempts
    pub regen_pause_ms: u32,
    pub seed: u32,
    /// Where log output goes; `None` discards it
    pub log_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            collect_pause_ms: COLLECT_PAUSE_MS,
            regen_pause_ms: REGEN_PAUSE_MS,
            seed: 1,
            log_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults; the seed falls
    /// back to the current time so every run deals a different board.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reading through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        let mut grid = defaults.grid;
        grid.rows = parsed(&lookup, "TILE_POP_ROWS").unwrap_or(grid.rows);
        grid.columns = parsed(&lookup, "TILE_POP_COLUMNS").unwrap_or(grid.columns);
        grid.palette_size = parsed(&lookup, "TILE_POP_PALETTE").unwrap_or(grid.palette_size);

        let seed = parsed(&lookup, "TILE_POP_SEED").unwrap_or_else(time_seed);

        let log_path = lookup("TILE_POP_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            grid,
            seed,
            log_path,
            ..defaults
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
