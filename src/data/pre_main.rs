// Work done in main before egui starts up (so can't rely on gui app state)

use anyhow::{Context, Result};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::Cli;
use crate::config::{BinanceApiConfig, DASHBOARD};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
#[cfg(not(target_arch = "wasm32"))]
use crate::config::DEFAULT_PAIRS_FILE;
use crate::domain::pair::parse_pairs;
use crate::domain::{Selection, SupportedPair};

/// Everything the app needs that is decided before the first frame.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub api: BinanceApiConfig,
    /// Pairs offered in the selector, in display order. Never empty.
    pub catalog: Vec<SupportedPair>,
    /// Selection forced from the command line. Wins over the persisted one.
    pub initial_selection: Option<Selection>,
}

impl LaunchConfig {
    pub fn from_cli(args: &Cli) -> Result<Self> {
        let api = match &args.api_url {
            Some(url) => BinanceApiConfig::default().with_base_url(url.clone()),
            None => BinanceApiConfig::default(),
        };

        let mut catalog = load_catalog(args)?;

        let initial_selection = match (&args.pair, args.timeframe) {
            (None, None) => None,
            (pair, timeframe) => {
                let base = Selection::default();
                Some(Selection::new(
                    timeframe.unwrap_or(base.timeframe),
                    pair.as_deref().unwrap_or(&base.pair),
                ))
            }
        };

        // A pair asked for on the command line must be selectable.
        if let Some(selection) = &initial_selection {
            if !catalog.iter().any(|p| p.identifier == selection.pair) {
                catalog.insert(0, SupportedPair::new(selection.pair.clone(), ""));
            }
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Launch: api={} pairs={} selection={:?}",
                api.base_url,
                catalog.len(),
                initial_selection.as_ref().map(|s| s.to_string())
            );
        }

        Ok(Self {
            api,
            catalog,
            initial_selection,
        })
    }
}

pub fn bundled_catalog() -> Vec<SupportedPair> {
    DASHBOARD.catalog.iter().map(SupportedPair::from).collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_catalog(args: &Cli) -> Result<Vec<SupportedPair>> {
    match &args.pairs_file {
        Some(path) => load_pairs_file(path),
        None => {
            let default = Path::new(DEFAULT_PAIRS_FILE);
            if default.exists() {
                load_pairs_file(default)
            } else {
                Ok(bundled_catalog())
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_catalog(args: &Cli) -> Result<Vec<SupportedPair>> {
    if args.pairs_file.is_some() {
        log::warn!("Pairs files are not available in the browser; using the bundled list");
    }
    Ok(bundled_catalog())
}

/// Read a pairs file (see [`parse_pairs`] for the format). An empty list is an error.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_pairs_file(path: &Path) -> Result<Vec<SupportedPair>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pairs file {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("in pairs file {}", path.display()))
}

fn parse_catalog(content: &str) -> Result<Vec<SupportedPair>> {
    let pairs = parse_pairs(content);
    if pairs.is_empty() {
        anyhow::bail!("no pairs listed");
    }
    log::info!("Loaded {} pairs", pairs.len());
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timeframe;
    use std::io::Write;

    fn cli() -> Cli {
        Cli {
            pair: None,
            timeframe: None,
            api_url: None,
            pairs_file: Some(std::path::PathBuf::from("/definitely/not/here/pairs.txt")),
        }
    }

    #[test]
    fn missing_explicit_pairs_file_is_an_error() {
        let err = LaunchConfig::from_cli(&cli()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read pairs file"));
    }

    #[test]
    fn pairs_file_drives_catalog() {
        let path = std::env::temp_dir().join(format!("candle_scope_pairs_{}.txt", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# majors\nbtcusdt,₿\nETHUSDT\n\nBTCUSDT").unwrap();
        drop(file);

        let pairs = load_pairs_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            pairs,
            vec![
                SupportedPair::new("BTCUSDT", "₿"),
                SupportedPair::new("ETHUSDT", "")
            ]
        );
    }

    #[test]
    fn comment_only_catalog_is_rejected() {
        assert!(parse_catalog("# nothing\n\n").is_err());
    }

    #[test]
    fn cli_pair_and_timeframe_become_initial_selection() {
        let args = Cli {
            pair: Some("dotusdt".into()),
            timeframe: Some(Timeframe::H4),
            api_url: Some("http://localhost:9000".into()),
            pairs_file: None,
        };
        let launch = LaunchConfig::from_cli(&args).unwrap();
        assert_eq!(
            launch.initial_selection,
            Some(Selection::new(Timeframe::H4, "DOTUSDT"))
        );
        assert_eq!(launch.api.base_url, "http://localhost:9000");
        assert!(launch.catalog.iter().any(|p| p.identifier == "DOTUSDT"));
    }

    #[test]
    fn timeframe_alone_keeps_default_pair() {
        let args = Cli {
            pair: None,
            timeframe: Some(Timeframe::D1),
            api_url: None,
            pairs_file: None,
        };
        let launch = LaunchConfig::from_cli(&args).unwrap();
        let selection = launch.initial_selection.unwrap();
        assert_eq!(selection.timeframe, Timeframe::D1);
        assert_eq!(selection.pair, DASHBOARD.default_pair);
    }
}
