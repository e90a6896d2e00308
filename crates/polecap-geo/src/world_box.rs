use glam::DVec3;

/// Axis-aligned box in planar world space.
///
/// Invariant: `min <= max` on every axis. The constructor sorts components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl WorldBox {
    /// Create a box from two opposite corners.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Center of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The four corners of the `z = min.z` face, ordered bottom-left,
    /// bottom-right, top-right, top-left.
    pub fn planar_corners(&self) -> [DVec3; 4] {
        let z = self.min.z;
        [
            DVec3::new(self.min.x, self.min.y, z),
            DVec3::new(self.max.x, self.min.y, z),
            DVec3::new(self.max.x, self.max.y, z),
            DVec3::new(self.min.x, self.max.y, z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_sorts_components() {
        let b = WorldBox::new(DVec3::new(10.0, -1.0, 3.0), DVec3::new(-2.0, 5.0, 0.0));
        assert_eq!(b.min, DVec3::new(-2.0, -1.0, 0.0));
        assert_eq!(b.max, DVec3::new(10.0, 5.0, 3.0));
    }

    #[test]
    fn test_center_and_size() {
        let b = WorldBox::new(DVec3::ZERO, DVec3::new(4.0, 2.0, 0.0));
        assert_eq!(b.center(), DVec3::new(2.0, 1.0, 0.0));
        assert_eq!(b.size(), DVec3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn test_contains_point_on_edge() {
        let b = WorldBox::new(DVec3::ZERO, DVec3::new(10.0, 10.0, 0.0));
        assert!(b.contains_point(DVec3::new(10.0, 5.0, 0.0)));
        assert!(!b.contains_point(DVec3::new(10.5, 5.0, 0.0)));
    }

    #[test]
    fn test_planar_corners_are_counter_clockwise() {
        let b = WorldBox::new(DVec3::ZERO, DVec3::new(2.0, 1.0, 0.0));
        let [bl, br, tr, tl] = b.planar_corners();
        assert_eq!(bl, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(br, DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(tr, DVec3::new(2.0, 1.0, 0.0));
        assert_eq!(tl, DVec3::new(0.0, 1.0, 0.0));
    }
}
