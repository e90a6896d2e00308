//! Configuration for the polar cap generator.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line via clap. Every section is `#[serde(default)]`, so older or
//! partial files keep loading as fields are added.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    APP_NAME, CONFIG_FILE, CapConfig, Config, DebugConfig, OutputConfig, PipelineConfig,
    StyleConfig, ZoomConfig, default_config_dir,
};
pub use error::ConfigError;
