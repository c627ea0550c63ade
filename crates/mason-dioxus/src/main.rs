use dioxus::prelude::*;
use mason_engine::io;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use mason_config::Config;
use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("mason starting up!");

    // Determine content path from CLI args or config file
    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let content_path;
    let from_config;

    let args_count = env::args().count();
    if args_count == 2 {
        let args: Vec<String> = env::args().collect();
        content_path = PathBuf::from(&args[1]);
        from_config = false;
        log::info!(
            "Using content path from CLI argument: {}",
            content_path.display()
        );
    } else if args_count == 1 {
        // No CLI argument - try config file
        log::info!("No CLI argument provided, checking config file");
        match Config::load() {
            Ok(Some(config)) => {
                content_path = config.content_path;
                from_config = true;
                log::info!(
                    "Loaded content path from config: {}",
                    content_path.display()
                );
            }
            Ok(None) => {
                eprintln!("Error: No content path provided and no config file found");
                let program_name = env::args().next().unwrap_or_else(|| "mason".to_string());
                eprintln!("Usage: {} <content-file-path>", program_name);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                let program_name = env::args().next().unwrap_or_else(|| "mason".to_string());
                eprintln!("Usage: {} <content-file-path>", program_name);
                process::exit(1);
            }
        }
    } else {
        let program_name = env::args().next().unwrap_or_else(|| "mason".to_string());
        eprintln!("Usage: {} [content-file-path]", program_name);
        process::exit(1);
    };

    // An existing content file must parse before we launch and start
    // autosaving over it. A missing file just means a fresh document.
    if content_path.exists() {
        if let Err(e) = io::load_document(&content_path) {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Content file '{}'{} cannot be opened: {e}",
                content_path.display(),
                source
            );
            process::exit(1);
        }
    } else {
        log::info!(
            "Content file {} does not exist yet, starting with an empty document",
            content_path.display()
        );
    }

    log::info!("About to launch Dioxus app for desktop");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .launch(app_root);
}

fn app_root() -> Element {
    // Re-derive the content path using the same logic as main
    let args_count = env::args().count();
    let content_path = if args_count == 2 {
        let args: Vec<String> = env::args().collect();
        PathBuf::from(&args[1])
    } else {
        // No CLI argument - use config file, error if not found
        Config::load()
            .map_err(|_| "Config file error")
            .unwrap()
            .unwrap_or_else(|| panic!("Config file not found"))
            .content_path
    };

    rsx! {
        App { content_path: content_path }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("mason")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
