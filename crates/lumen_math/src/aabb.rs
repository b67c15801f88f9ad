use crate::{Interval, Vec3};

/// Axis-Aligned Bounding Box for the photon map's spatial subdivision.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D
/// volume. Containment is inclusive on all six bounds, so a point lying
/// exactly on a plane shared by two boxes is inside both of them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Returns true if the point lies within the box, inclusive on all
    /// six bounds.
    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Returns the extents of the box along each axis.
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Returns the largest of the three extents.
    pub fn max_extent(&self) -> f32 {
        self.x.size().max(self.y.size()).max(self.z.size())
    }

    /// Subdivide the box into its eight equal octants.
    ///
    /// Octants are enumerated with x as the outer index, then y, then z,
    /// so octant `i` selects the x half from bit 2, the y half from bit 1
    /// and the z half from bit 0. Each octant halves every extent exactly;
    /// sibling octants share their boundary planes.
    pub fn octants(&self) -> [Aabb; 8] {
        let mut boxes = [*self; 8];
        for (i, b) in boxes.iter_mut().enumerate() {
            b.x = self.x.half((i >> 2) & 1);
            b.y = self.y.half((i >> 1) & 1);
            b.z = self.z.half(i & 1);
        }
        boxes
    }

    /// Static constant: an empty box containing nothing.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 10.0, 10.0);
        let aabb = Aabb::from_points(a, b);

        assert_eq!(aabb.x.min, 0.0);
        assert_eq!(aabb.x.max, 10.0);
        assert_eq!(aabb.y.min, 0.0);
        assert_eq!(aabb.y.max, 10.0);
        assert_eq!(aabb.z.min, 0.0);
        assert_eq!(aabb.z.max, 10.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
    }

    #[test]
    fn test_aabb_contains_is_inclusive() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));

        assert!(aabb.contains(Vec3::new(0.5, 0.5, 0.5)));
        assert!(aabb.contains(Vec3::ZERO));
        assert!(aabb.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(aabb.contains(Vec3::new(1.0, 0.5, 0.0)));
        assert!(!aabb.contains(Vec3::new(1.1, 0.5, 0.5)));
    }

    #[test]
    fn test_aabb_center() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.center(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_aabb_max_extent() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 5.0, 1.0));
        assert_eq!(aabb.max_extent(), 5.0);
    }

    #[test]
    fn test_aabb_octants_halve_exactly() {
        let aabb = Aabb::from_points(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 8.0, 6.0));
        let octants = aabb.octants();

        for octant in &octants {
            assert_eq!(octant.x.size(), 2.0);
            assert_eq!(octant.y.size(), 4.0);
            assert_eq!(octant.z.size(), 1.0);
        }

        // x outer, y middle, z inner: octant 0 is the low corner,
        // octant 1 differs only in z, octant 4 only in x.
        assert_eq!(octants[0].x.min, -2.0);
        assert_eq!(octants[0].y.min, 0.0);
        assert_eq!(octants[0].z.min, 4.0);
        assert_eq!(octants[1].z.min, 5.0);
        assert_eq!(octants[2].y.min, 4.0);
        assert_eq!(octants[4].x.min, 0.0);
    }

    #[test]
    fn test_aabb_octants_share_boundaries() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        let octants = aabb.octants();
        let center = aabb.center();

        // The exact center is inside all eight octants.
        for octant in &octants {
            assert!(octant.contains(center));
        }
    }
}
