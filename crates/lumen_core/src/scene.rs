//! Scene interface consumed by the renderer.

use lumen_math::{Aabb, Ray, Vec3};
use rand::RngCore;

use crate::octree::PhotonMap;

/// Result of casting a ray against scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the render group that was hit
    pub group: usize,
    /// Index of the primitive within the group
    pub primitive: usize,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
}

/// The view of a scene the renderer needs: a bounding volume, radiance
/// integrators, and primary-ray casting.
///
/// The photon map is owned by the scene and absent until a photon tracing
/// pass builds it; render modes that need it must check for its presence
/// first. Implementations must be safe to share across the parallel pixel
/// loop, which only ever reads the scene.
pub trait SceneView: Send + Sync {
    /// Bounding volume enclosing all scene geometry.
    fn bounds(&self) -> Aabb;

    /// The photon map, if one has been built for this scene.
    fn photon_map(&self) -> Option<&PhotonMap>;

    /// Estimate radiance along `ray` by path tracing.
    fn trace_ray(&self, ray: &Ray, max_bounce: u32, max_depth: u32, rng: &mut dyn RngCore)
        -> Vec3;

    /// Estimate radiance along `ray`, consulting the photon map for the
    /// indirect term.
    fn trace_ray_with_photon_map(
        &self,
        ray: &Ray,
        max_bounce: u32,
        max_depth: u32,
        rng: &mut dyn RngCore,
    ) -> Vec3;

    /// Cast `ray` against scene geometry and return the closest hit.
    fn ray_cast(&self, ray: &Ray) -> Option<RayHit>;
}
