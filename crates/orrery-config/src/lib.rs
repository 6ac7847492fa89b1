//! Configuration for the orrery viewer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Unknown fields are ignored and missing sections fall back to
//! their defaults, so older and newer config files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssetConfig, Config, DebugConfig, InputConfig, RenderConfig, SceneConfig, WindowConfig,
};
pub use error::ConfigError;
