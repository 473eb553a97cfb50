//! Bounce Box entry point
//!
//! Native builds run the scene headless and log what happened. The browser
//! build draws it with rough.js.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Bounce Box starting...");

    if let Err(e) = bounce_box::platform::web::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// `bounce-box [settings.json] [seconds]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bounce_box::Settings;
    use bounce_box::platform::native::run_headless;

    env_logger::init();
    log::info!("Bounce Box (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seconds = match args.next().map(|s| s.parse::<f64>()) {
        Some(Ok(seconds)) if seconds > 0.0 => seconds,
        Some(_) => {
            log::error!("Duration must be a positive number of seconds");
            std::process::exit(1);
        }
        None => 30.0,
    };

    if let Err(e) = run_headless(&settings, seconds) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
