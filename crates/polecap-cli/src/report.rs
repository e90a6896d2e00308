//! Generation summary and JSON export.

use std::path::Path;

use polecap_core::{CapResult, Hemisphere, PolarTile};
use polecap_geo::TileAddress;
use serde::Serialize;

/// One synthesized tile as written to the JSON report.
#[derive(Debug, Serialize)]
pub struct TileReport {
    pub address: TileAddress,
    pub hemisphere: &'static str,
    pub appearance: String,
    /// Tile-local positions in destination space.
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl From<&PolarTile> for TileReport {
    fn from(tile: &PolarTile) -> Self {
        Self {
            address: tile.address,
            hemisphere: tile.hemisphere.style_kind(),
            appearance: tile.appearance.name().to_string(),
            positions: tile
                .geometry
                .positions
                .iter()
                .map(|p| p.to_array())
                .collect(),
            indices: tile.geometry.indices.clone(),
        }
    }
}

/// Everything produced for one zoom level.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub zoom_level: u32,
    pub threshold_deg: f64,
    pub requested: usize,
    pub north: usize,
    pub south: usize,
    /// Tiles that produced no cap surface.
    pub empty: usize,
    pub failed: Vec<String>,
    /// Tiles submitted whose result never came back.
    pub lost: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub tiles: Vec<TileReport>,
}

impl Report {
    pub fn new(zoom_level: u32, threshold_deg: f64, requested: usize) -> Self {
        Self {
            zoom_level,
            threshold_deg,
            requested,
            ..Default::default()
        }
    }

    /// Fold a pipeline result into the summary.
    pub fn record(&mut self, result: CapResult) {
        match result.outcome {
            Ok(Some(tile)) => {
                match tile.hemisphere {
                    Hemisphere::North => self.north += 1,
                    Hemisphere::South => self.south += 1,
                }
                self.vertices += tile.geometry.vertex_count();
                self.triangles += tile.geometry.triangle_count();
                self.tiles.push(TileReport::from(&tile));
            }
            Ok(None) => self.empty += 1,
            Err(err) => self.failed.push(format!("{}: {err}", result.address)),
        }
    }

    /// Number of results recorded so far.
    pub fn received(&self) -> usize {
        self.north + self.south + self.empty + self.failed.len()
    }

    /// Sort tiles by address so reports are stable across runs.
    pub fn finish(&mut self) {
        self.tiles.sort_by_key(|tile| tile.address);
        self.failed.sort();
    }

    pub fn write_json(&self, path: &Path, pretty: bool) -> Result<(), crate::AppError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        if pretty {
            serde_json::to_writer_pretty(file, self)?;
        } else {
            serde_json::to_writer(file, self)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use polecap_core::{CapError, CapGeometry};
    use polecap_style::{Appearance, AppearanceDef};

    fn tile(address: TileAddress, hemisphere: Hemisphere) -> PolarTile {
        PolarTile {
            address,
            hemisphere,
            geometry: CapGeometry {
                positions: vec![Default::default(); 4],
                indices: vec![0, 1, 2, 0, 2, 3],
            },
            appearance: Arc::new(
                Appearance::from_def(AppearanceDef {
                    name: "ice".to_string(),
                    ..Default::default()
                })
                .unwrap(),
            ),
        }
    }

    fn result(
        address: TileAddress,
        outcome: Result<Option<PolarTile>, CapError>,
    ) -> CapResult {
        CapResult {
            address,
            outcome,
            generation: 0,
        }
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut report = Report::new(2, 85.0, 4);
        let a = TileAddress::new(2, 3, 1);
        let b = TileAddress::new(2, 0, 1);
        report.record(result(a, Ok(Some(tile(a, Hemisphere::North)))));
        report.record(result(b, Ok(Some(tile(b, Hemisphere::South)))));
        report.record(result(TileAddress::new(2, 1, 1), Ok(None)));
        report.record(result(
            TileAddress::new(2, 3, 0),
            Err(CapError::InvalidThreshold(100.0)),
        ));
        report.finish();

        assert_eq!(report.received(), 4);
        assert_eq!((report.north, report.south, report.empty), (1, 1, 1));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.vertices, 8);
        assert_eq!(report.triangles, 4);
        assert_eq!(report.tiles[0].address, b);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let mut report = Report::new(1, 85.0, 1);
        let a = TileAddress::new(1, 1, 0);
        report.record(result(a, Ok(Some(tile(a, Hemisphere::North)))));
        report.write_json(&path, false).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["zoom_level"], 1);
        assert_eq!(value["tiles"][0]["hemisphere"], "north_pole");
        assert_eq!(value["tiles"][0]["address"]["row"], 1);
        assert_eq!(value["tiles"][0]["positions"].as_array().unwrap().len(), 4);
    }
}
