//! Lumen Renderer - CPU photon-map rendering.
//!
//! An offline Monte Carlo renderer with three estimation strategies:
//! plain path tracing, photon-map-assisted path tracing, and a debug
//! visualization of the photon map itself. The camera shoots stratified
//! jittered sample rays through a bilinear image-plane quad, averages the
//! weighted radiance estimates into an HDR frame buffer, then tone-maps,
//! quantizes and writes the result as a TGA file.

mod camera;
mod error;
mod framebuffer;
mod tga;
mod tonemap;

pub use camera::{Camera, ImagePlane, RenderConfig, RenderMode};
pub use error::RenderError;
pub use framebuffer::{Color, FrameBuffer};
pub use tga::{write as write_tga, write_to_path as write_tga_to_path};
pub use tonemap::{quantize, DARK_IMAGE_THRESHOLD};

/// Re-export the scene-facing types and common math types
pub use lumen_core::{Photon, PhotonMap, RayHit, SceneView};
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
