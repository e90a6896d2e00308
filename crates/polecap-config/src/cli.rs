//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Polar cap generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "polecap", about = "Generate polar cap geometry for map tiles")]
pub struct CliArgs {
    /// Zoom level to generate.
    #[arg(long)]
    pub zoom: Option<u32>,

    /// Cap boundary latitude in degrees.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Map projection latitude limit in degrees.
    #[arg(long)]
    pub max_latitude: Option<f64>,

    /// Extra geometry subdivision levels.
    #[arg(long, allow_hyphen_values = true)]
    pub geometry_level_offset: Option<i32>,

    /// Number of worker threads.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Maximum tiles in flight.
    #[arg(long)]
    pub budget: Option<usize>,

    /// RON style manifest.
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Write a JSON report of the generated tiles.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(zoom) = args.zoom {
            self.zoom.level = zoom;
        }
        if let Some(threshold) = args.threshold {
            self.cap.threshold_deg = Some(threshold);
        }
        if let Some(limit) = args.max_latitude {
            self.cap.max_latitude_deg = Some(limit);
        }
        if let Some(offset) = args.geometry_level_offset {
            self.zoom.geometry_level_offset = offset;
        }
        if let Some(workers) = args.workers {
            self.pipeline.worker_count = workers;
        }
        if let Some(budget) = args.budget {
            self.pipeline.budget = budget;
        }
        if let Some(ref path) = args.style {
            self.style.path = Some(path.clone());
        }
        if let Some(ref path) = args.output {
            self.output.path = Some(path.clone());
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
            zoom: Some(8),
            threshold: Some(84.0),
            workers: Some(2),
            style: Some(PathBuf::from("polar.ron")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.zoom.level, 8);
        assert_eq!(config.cap.threshold_deg, Some(84.0));
        assert_eq!(config.pipeline.worker_count, 2);
        assert_eq!(config.style.path, Some(PathBuf::from("polar.ron")));
        // Non-overridden fields retain defaults
        assert_eq!(config.cap.max_latitude_deg, None);
        assert_eq!(config.pipeline.budget, 64);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_arguments() {
        let args = CliArgs::try_parse_from([
            "polecap",
            "--zoom",
            "6",
            "--geometry-level-offset",
            "-2",
            "--output",
            "tiles.json",
        ])
        .unwrap();
        assert_eq!(args.zoom, Some(6));
        assert_eq!(args.geometry_level_offset, Some(-2));
        assert_eq!(args.output, Some(PathBuf::from("tiles.json")));
        assert!(args.threshold.is_none());
    }
}
