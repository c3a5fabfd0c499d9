#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::LaunchConfig;
pub use domain::{Candle, Selection, Series, Timeframe};
pub use ui::CandleScopeApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pair to open with (e.g. ETHUSDT). Overrides the remembered selection.
    #[arg(long)]
    pub pair: Option<String>,

    /// Timeframe to open with (1m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 12h, 1d, 3d, 1w)
    #[arg(long)]
    pub timeframe: Option<Timeframe>,

    /// Base URL of the exchange REST API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Pairs file: one symbol per line, optional `,icon`. Defaults to ./pairs.txt if present.
    #[arg(long)]
    pub pairs_file: Option<PathBuf>,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, launch: LaunchConfig) -> Box<dyn eframe::App> {
    Box::new(ui::CandleScopeApp::new(cc, launch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "candle-scope",
            "--pair",
            "ethusdt",
            "--timeframe",
            "4h",
            "--api-url",
            "http://localhost:8080",
            "--pairs-file",
            "my_pairs.txt",
        ])
        .unwrap();
        assert_eq!(cli.pair.as_deref(), Some("ethusdt"));
        assert_eq!(cli.timeframe, Some(Timeframe::H4));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.pairs_file, Some(PathBuf::from("my_pairs.txt")));
    }

    #[test]
    fn cli_rejects_unknown_timeframe() {
        assert!(Cli::try_parse_from(["candle-scope", "--timeframe", "7m"]).is_err());
    }
}
