//! The `orrery` binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags, e.g. `orrery --width 1920 --height 1080 --focus saturn`.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::platform::PlatformDirs;
use orrery_config::{CliArgs, Config};
use orrery_scene::BodyId;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir.clone()),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve config directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "Orrery {}x{}, textures from {}",
        config.window.width,
        config.window.height,
        config.assets.texture_dir.display()
    );

    let focus = match args.focus.as_deref().map(str::parse::<BodyId>).transpose() {
        Ok(focus) => focus,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match orrery_app::window::run(config, focus) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
