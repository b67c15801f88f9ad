//! Camera: stratified ray generation and the per-pixel integration loop.

use std::time::Instant;

use lumen_core::{PhotonMap, SceneView};
use lumen_math::{Ray, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::RenderError;
use crate::framebuffer::FrameBuffer;
use crate::tga;
use crate::tonemap;

/// How radiance is estimated for each sample ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Pure Monte Carlo path tracing.
    PathTrace,
    /// Path tracing with the photon map supplying the indirect term.
    PathTraceWithPhotonMap,
    /// Debug view: sum the photon powers stored in the octree leaf nearest
    /// each primary hit, with no density normalization.
    VisualizePhotonMap,
}

impl RenderMode {
    /// True for the modes that cannot render without a built photon map.
    pub fn requires_photon_map(&self) -> bool {
        !matches!(self, RenderMode::PathTrace)
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Radiance estimation strategy
    pub mode: RenderMode,
    /// Requested samples per pixel. The stratification factor is
    /// `k = round(sqrt(samples_per_pixel))` and `k * k` samples are
    /// actually taken, but averaging always divides by the requested
    /// count.
    pub samples_per_pixel: u32,
    /// Maximum ray bounce count
    pub max_bounce: u32,
    /// Maximum integrator recursion depth
    pub max_depth: u32,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::PathTrace,
            samples_per_pixel: 64,
            max_bounce: 3,
            max_depth: 5,
            seed: 0,
        }
    }
}

/// Four corner points defining a bilinear parameterization of the camera's
/// image plane, in ring order c1 -> c2 -> c3 -> c4.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlane {
    pub c1: Vec3,
    pub c2: Vec3,
    pub c3: Vec3,
    pub c4: Vec3,
}

impl ImagePlane {
    /// Create an image plane from its four corners.
    pub fn new(c1: Vec3, c2: Vec3, c3: Vec3, c4: Vec3) -> Self {
        Self { c1, c2, c3, c4 }
    }

    /// Unit normal of the plane, computed once per render call.
    pub fn normal(&self) -> Vec3 {
        -(self.c1 - self.c2).cross(self.c1 - self.c4).normalize()
    }

    /// Bilinearly interpolate the corners at normalized (u, v).
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        (1.0 - u) * (1.0 - v) * self.c1
            + u * (1.0 - v) * self.c2
            + u * v * self.c3
            + (1.0 - u) * v * self.c4
    }
}

/// The renderer: owns the frame buffer and drives sampling, integration,
/// tone mapping and image export.
pub struct Camera {
    frame: FrameBuffer,
}

impl Camera {
    /// Create a camera rendering at the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
        }
    }

    /// The frame buffer.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Mutable access to the frame buffer.
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Render the scene into the float plane of the frame buffer.
    ///
    /// For each pixel, `k * k` jittered stratified sample rays are built
    /// by bilinear interpolation of `plane` and shot from the plane point
    /// away from `eye`; each sample's radiance is weighted by
    /// `max(0, dot(point, plane_normal))`, accumulated, and averaged by
    /// the requested sample count.
    ///
    /// Pixels are rendered in parallel rows. Every pixel owns its random
    /// stream, seeded from `config.seed` plus the pixel index, so output
    /// does not depend on the thread schedule.
    ///
    /// Fails with [`RenderError::PhotonMapNotBuilt`], leaving the buffer
    /// untouched, when the mode needs a photon map the scene lacks.
    pub fn render(
        &mut self,
        scene: &dyn SceneView,
        config: &RenderConfig,
        eye: Vec3,
        plane: &ImagePlane,
    ) -> Result<(), RenderError> {
        let photon_map = if config.mode.requires_photon_map() {
            Some(
                scene
                    .photon_map()
                    .ok_or(RenderError::PhotonMapNotBuilt(config.mode))?,
            )
        } else {
            None
        };

        log::info!(
            "rendering {}x{} at {} samples per pixel ({:?})",
            self.frame.width,
            self.frame.height,
            config.samples_per_pixel,
            config.mode
        );
        let start = Instant::now();

        let width = self.frame.width;
        let inv_width = 1.0 / self.frame.width as f32;
        let inv_height = 1.0 / self.frame.height as f32;
        let inv_samples = 1.0 / config.samples_per_pixel as f32;
        let k = (config.samples_per_pixel as f32).sqrt().round() as u32;
        let inv_k = 1.0 / k as f32;
        let plane_normal = plane.normal();

        self.frame
            .pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let pixel_index = y as u64 * width as u64 + x as u64;
                    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(pixel_index));

                    let mut accumulator = Vec3::ZERO;
                    for sub_x in 0..k {
                        for sub_y in 0..k {
                            let u =
                                (x as f32 + (sub_x as f32 + rng.gen::<f32>()) * inv_k) * inv_width;
                            let v =
                                (y as f32 + (sub_y as f32 + rng.gen::<f32>()) * inv_k) * inv_height;
                            let point = plane.point_at(u, v);
                            let ray = Ray::new(point, (point - eye).normalize());
                            let weight = point.dot(plane_normal).max(0.0);

                            accumulator +=
                                weight * sample_radiance(scene, photon_map, config, &ray, &mut rng);
                        }
                    }
                    *pixel = inv_samples * accumulator;
                }
            });

        log::info!(
            "rendering finished and took {:.3} s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Tone-map and quantize the float plane into the 8-bit plane.
    pub fn quantize(&mut self) -> Result<(), RenderError> {
        tonemap::quantize(&mut self.frame)
    }

    /// Write the quantized plane to a TGA file.
    pub fn write_tga(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        tga::write_to_path(&self.frame, path)
    }
}

/// Radiance estimate for one sample ray under the selected mode.
fn sample_radiance(
    scene: &dyn SceneView,
    photon_map: Option<&PhotonMap>,
    config: &RenderConfig,
    ray: &Ray,
    rng: &mut StdRng,
) -> Vec3 {
    match config.mode {
        RenderMode::PathTrace => scene.trace_ray(ray, config.max_bounce, config.max_depth, rng),
        RenderMode::PathTraceWithPhotonMap => {
            scene.trace_ray_with_photon_map(ray, config.max_bounce, config.max_depth, rng)
        }
        RenderMode::VisualizePhotonMap => {
            // The precondition check guarantees the map exists for this
            // mode.
            let Some(map) = photon_map else {
                return Vec3::ZERO;
            };
            match scene.ray_cast(ray) {
                Some(hit) => {
                    let point = ray.at(hit.distance);
                    map.photons_at(point).map(|p| p.power).sum()
                }
                None => Vec3::ZERO,
            }
        }
    }
}
