#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[allow(unused_imports)]
use candle_scope::{
    Cli,          // The struct from lib.rs
    LaunchConfig, // Everything decided before the first frame
    run_app,      // The function from lib.rs
};

// --- WASM SPECIFIC CODE ---
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*; // REQUIRED for .dyn_into()

// Even though we use 'start', the compiler still wants a main() function
// because this file is compiled as a binary.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
fn init_web_logging() {
    let result = fern::Dispatch::new()
        .level(log::LevelFilter::Info)
        .chain(fern::Output::call(|record| {
            let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
            web_sys::console::log_1(&line.into());
        }))
        .apply();
    if result.is_err() {
        web_sys::console::warn_1(&"logger was already initialised".into());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    // A. Init Logging
    console_error_panic_hook::set_once();
    init_web_logging();

    log::info!("Candle Scope starting in WASM mode...");

    // B. No command line in the browser: bundled catalog, default selection
    let launch = LaunchConfig::from_cli(&Cli::default())
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;

    let web_options = eframe::WebOptions::default();

    // C. Find the canvas element by ID
    let window = web_sys::window().ok_or("no global `window` exists")?;
    let document = window.document().ok_or("should have a document on window")?;
    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or("Failed to find canvas with id 'the_canvas_id'")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "the_canvas_id was not a valid HtmlCanvasElement")?;

    // D. Start the App
    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| Ok(run_app(cc, launch))),
        )
        .await
}

// --- NATIVE SPECIFIC CODE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use candle_scope::config::APP_STATE_PATH;
    use clap::Parser;
    use eframe::NativeOptions;
    use std::path::PathBuf;
    use tokio::runtime::Runtime;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let launch = match LaunchConfig::from_cli(&args) {
        Ok(launch) => launch,
        Err(e) => {
            log::error!("Startup failed: {:#}", e);
            std::process::exit(2);
        }
    };

    // C. Runtime for the market-data requests. The guard lets promises spawn onto it
    // from the UI thread for the whole life of the app.
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let _guard = rt.enter();

    // D. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        "Candle Scope",
        options,
        Box::new(move |cc| Ok(run_app(cc, launch))),
    )
}
