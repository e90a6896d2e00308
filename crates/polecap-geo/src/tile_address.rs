//! Quadtree tile addressing.

use serde::{Deserialize, Serialize};

/// Identifies one tile of a quadtree tiling scheme.
///
/// - `level`: quadtree depth. Level 0 is a single tile covering the world;
///   level `l` has `grid_size(l) × grid_size(l)` tiles.
/// - `row`, `column`: grid coordinates at this level. Row 0 is the southernmost
///   row, column 0 the westernmost column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileAddress {
    /// Quadtree depth (0 = whole world).
    pub level: u32,
    /// Row index, counted from the south.
    pub row: u32,
    /// Column index, counted from the west.
    pub column: u32,
}

impl TileAddress {
    /// Deepest supported level.
    pub const MAX_LEVEL: u32 = 30;

    /// Number of tiles along one axis at the given level.
    ///
    /// # Panics
    ///
    /// Panics if `level` exceeds [`Self::MAX_LEVEL`].
    #[must_use]
    pub fn grid_size(level: u32) -> u32 {
        assert!(
            level <= Self::MAX_LEVEL,
            "level {level} exceeds MAX_LEVEL {}",
            Self::MAX_LEVEL
        );
        1 << level
    }

    /// Construct a `TileAddress`, validating `row` and `column` against the
    /// grid of the given level.
    ///
    /// # Panics
    ///
    /// Panics if `level` exceeds [`Self::MAX_LEVEL`] or if `row`/`column` are
    /// out of range.
    #[must_use]
    pub fn new(level: u32, row: u32, column: u32) -> Self {
        let size = Self::grid_size(level);
        assert!(row < size, "row={row} out of range for level {level} (max {size})");
        assert!(
            column < size,
            "column={column} out of range for level {level} (max {size})"
        );
        Self { level, row, column }
    }

    /// The root tile covering the whole world.
    #[must_use]
    pub fn root() -> Self {
        Self::new(0, 0, 0)
    }

    /// Normalized bounds of this tile within the unit square.
    ///
    /// Returns `(x_min, y_min, x_max, y_max)`, all in \[0, 1\].
    #[must_use]
    pub fn unit_bounds(&self) -> (f64, f64, f64, f64) {
        let size = f64::from(Self::grid_size(self.level));
        (
            f64::from(self.column) / size,
            f64::from(self.row) / size,
            f64::from(self.column + 1) / size,
            f64::from(self.row + 1) / size,
        )
    }

    /// The parent tile one level up, or `None` at level 0.
    #[must_use]
    pub fn parent(&self) -> Option<TileAddress> {
        if self.level == 0 {
            return None;
        }
        Some(TileAddress {
            level: self.level - 1,
            row: self.row / 2,
            column: self.column / 2,
        })
    }

    /// The four child tiles one level down, or `None` at [`Self::MAX_LEVEL`].
    ///
    /// Children are ordered south-west, south-east, north-west, north-east.
    #[must_use]
    pub fn children(&self) -> Option<[TileAddress; 4]> {
        if self.level >= Self::MAX_LEVEL {
            return None;
        }
        let level = self.level + 1;
        let r = self.row * 2;
        let c = self.column * 2;
        Some([
            TileAddress::new(level, r, c),
            TileAddress::new(level, r, c + 1),
            TileAddress::new(level, r + 1, c),
            TileAddress::new(level, r + 1, c + 1),
        ])
    }
}

impl std::fmt::Display for TileAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(level={}, row={}, column={})",
            self.level, self.row, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_address_equality_and_hashing() {
        let a = TileAddress::new(5, 10, 20);
        let b = TileAddress::new(5, 10, 20);
        let c = TileAddress::new(5, 10, 21);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_grid_size_doubles_per_level() {
        assert_eq!(TileAddress::grid_size(0), 1);
        assert_eq!(TileAddress::grid_size(1), 2);
        assert_eq!(TileAddress::grid_size(5), 32);
    }

    #[test]
    fn test_root_covers_unit_square() {
        let (x0, y0, x1, y1) = TileAddress::root().unit_bounds();
        assert_eq!((x0, y0, x1, y1), (0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_parent_of_child() {
        let child = TileAddress::new(3, 6, 5);
        let parent = child.parent().expect("should have parent");
        assert_eq!(parent, TileAddress::new(2, 3, 2));
        assert!(TileAddress::root().parent().is_none());
    }

    #[test]
    fn test_children_cover_parent() {
        let parent = TileAddress::new(4, 7, 9);
        let (px0, py0, px1, py1) = parent.unit_bounds();
        let children = parent.children().expect("should have children");

        let mut bounds = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for child in &children {
            assert_eq!(child.parent(), Some(parent));
            let (x0, y0, x1, y1) = child.unit_bounds();
            bounds = (bounds.0.min(x0), bounds.1.min(y0), bounds.2.max(x1), bounds.3.max(y1));
        }
        assert!((bounds.0 - px0).abs() < 1e-12);
        assert!((bounds.1 - py0).abs() < 1e-12);
        assert!((bounds.2 - px1).abs() < 1e-12);
        assert!((bounds.3 - py1).abs() < 1e-12);
    }

    #[test]
    fn test_max_level_has_no_children() {
        let addr = TileAddress::new(TileAddress::MAX_LEVEL, 0, 0);
        assert!(addr.children().is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_invalid_coordinates_panic() {
        let _ = TileAddress::new(2, 4, 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TileAddress::new(3, 1, 2).to_string(),
            "(level=3, row=1, column=2)"
        );
    }
}
