//! Persistence configuration

/// Path for saving/loading application UI state (selection + theme) on native builds
pub const APP_STATE_PATH: &str = ".candle_scope_state.json";

/// Default pairs file looked up next to the binary when `--pairs-file` is not given
pub const DEFAULT_PAIRS_FILE: &str = "pairs.txt";
