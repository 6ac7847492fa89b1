//! Command-line arguments for the `orrery` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// Values given here override the ones loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Rotating Earth globe with a solar-system view")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Directory containing the texture images.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Seed for the starfield and initial orbit angles.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of stars in the background point cloud.
    #[arg(long)]
    pub star_count: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Body to focus on at startup (e.g. "mars").
    #[arg(long)]
    pub focus: Option<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(ref dir) = args.texture_dir {
            self.assets.texture_dir = dir.clone();
        }
        if args.seed.is_some() {
            self.scene.seed = args.seed;
        }
        if let Some(count) = args.star_count {
            self.scene.star_count = count;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            texture_dir: Some(PathBuf::from("assets/2k")),
            seed: Some(7),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.assets.texture_dir, PathBuf::from("assets/2k"));
        assert_eq!(config.scene.seed, Some(7));
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.scene.star_count, 10_000);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "orrery",
            "--star-count",
            "250",
            "--focus",
            "saturn",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.star_count, Some(250));
        assert_eq!(args.focus.as_deref(), Some("saturn"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.width.is_none());
    }
}
