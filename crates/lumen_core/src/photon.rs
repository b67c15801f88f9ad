//! Photon sample type.

use lumen_math::Vec3;

/// A point-located light-transport sample.
///
/// Photons are created once by the photon tracing pass and never mutated;
/// octree cells refer to them by index into the map's flat photon list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    /// World-space position where the photon landed
    pub position: Vec3,
    /// Carried color/power
    pub power: Vec3,
}

impl Photon {
    /// Create a new photon.
    #[inline]
    pub fn new(position: Vec3, power: Vec3) -> Self {
        Self { position, power }
    }
}
