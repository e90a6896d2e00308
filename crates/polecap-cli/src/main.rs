//! `polecap`: generates the polar cap tiles of one zoom level.
//!
//! Tiles come from the geographic quadtree, caps are drawn on a globe, and
//! the cap boundary follows the Mercator latitude limit unless configured.
//!
//! Run with: `cargo run -p polecap-cli -- --zoom 6 --output caps.json`

mod report;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use polecap_config::{CliArgs, Config, default_config_dir};
use polecap_core::{
    CapError, CapPipeline, CapSettings, PolarCapThreshold, PolarTileSource, SourceSettings,
    StyleBundle,
};
use polecap_geo::{GeographicTilingScheme, MercatorProjection, Projection, SphereProjection};
use polecap_style::{StyleError, StyleEvaluator};
use tracing::{info, warn};

use crate::report::Report;

/// Style used when no manifest is configured.
const BUILTIN_STYLE: &str = include_str!("../styles/polar.ron");

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("style: {0}")]
    Style(#[from] StyleError),
    #[error("cap settings: {0}")]
    Cap(#[from] CapError),
    #[error(
        "cap threshold {threshold}° differs from projection limit {max_latitude}°; \
         tiles with a corner between the two cannot be clipped"
    )]
    LimitMismatch { threshold: f64, max_latitude: f64 },
    #[error("report: {0}")]
    Io(#[from] std::io::Error),
    #[error("report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    polecap_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(report) if report.failed.is_empty() && report.lost == 0 => ExitCode::SUCCESS,
        Ok(report) => {
            for failure in &report.failed {
                warn!("Failed tile {failure}");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_style(config: &Config) -> Result<StyleBundle, StyleError> {
    let evaluator = match &config.style.path {
        Some(path) => StyleEvaluator::from_ron(path)?,
        None => StyleEvaluator::from_ron_str(BUILTIN_STYLE)?,
    };
    StyleBundle::from_evaluator(Arc::new(evaluator))
}

/// Cap settings for `map` with the configured overrides.
///
/// A configured threshold also becomes the projection limit unless that is
/// configured too. The two must agree.
fn cap_settings(config: &Config, map: &dyn Projection) -> Result<CapSettings, AppError> {
    let mut settings = CapSettings::for_projection(map)?;
    if let Some(threshold) = config.cap.threshold_deg {
        settings = settings.with_threshold(PolarCapThreshold::new(threshold)?);
        settings.max_latitude = threshold;
    }
    if let Some(limit) = config.cap.max_latitude_deg {
        settings.max_latitude = limit;
    }

    let threshold = settings.threshold.latitude();
    if threshold != settings.max_latitude {
        return Err(AppError::LimitMismatch {
            threshold,
            max_latitude: settings.max_latitude,
        });
    }
    Ok(settings)
}

fn source_settings(config: &Config) -> SourceSettings {
    SourceSettings {
        min_zoom_level: config.zoom.min_zoom_level,
        max_zoom_level: config.zoom.max_zoom_level,
        storage_level_offset: config.zoom.storage_level_offset,
        geometry_level_offset: config.zoom.geometry_level_offset,
    }
}

/// No further result can arrive: nothing is left in flight to wait for, or
/// no worker is left to process it.
fn stalled(pipeline: &CapPipeline, all_submitted: bool) -> bool {
    (all_submitted && pipeline.in_flight_count() == 0) || !pipeline.has_workers()
}

fn run(config: &Config) -> Result<Report, AppError> {
    let cap = cap_settings(config, &MercatorProjection::default())?;
    let source = Arc::new(PolarTileSource::new(
        Arc::new(GeographicTilingScheme::default()),
        Arc::new(SphereProjection::default()),
        cap,
        source_settings(config),
    ));
    source.set_style(load_style(config)?);

    let zoom = config.zoom.level;
    let addresses = source.collect_polar_tiles(zoom);
    info!(
        "Generating {} polar tiles at zoom {zoom} (threshold {:.4}°, limit {:.4}°)",
        addresses.len(),
        cap.threshold.latitude(),
        cap.max_latitude
    );

    let started = Instant::now();
    let mut report = Report::new(zoom, cap.threshold.latitude(), addresses.len());
    let mut pipeline = CapPipeline::new(
        config.pipeline.worker_count.max(1),
        config.pipeline.budget.max(1),
        Arc::clone(&source),
    );

    let mut pending = addresses.into_iter().peekable();
    while report.received() < report.requested {
        while let Some(&address) = pending.peek() {
            if !pipeline.submit(address, 0) {
                break;
            }
            pending.next();
        }
        if let Some(result) = pipeline.recv_result(Duration::from_millis(100)) {
            report.record(result);
        } else if stalled(&pipeline, pending.peek().is_none()) {
            for result in pipeline.drain_results() {
                report.record(result);
            }
            break;
        }
    }
    pipeline.shutdown();
    let lost = report.requested - report.received();
    if lost > 0 {
        warn!("{lost} tiles were never returned by the pipeline");
        report.lost = lost;
    }
    report.finish();

    info!(
        "Generated {} north and {} south caps ({} empty, {} failed, {} lost) in {:.1?}",
        report.north,
        report.south,
        report.empty,
        report.failed.len(),
        report.lost,
        started.elapsed()
    );
    info!(
        "{} vertices, {} triangles",
        report.vertices, report.triangles
    );

    if let Some(path) = &config.output.path {
        report.write_json(path, config.output.pretty)?;
        info!("Wrote report to {}", path.display());
    }
    Ok(report)
}
