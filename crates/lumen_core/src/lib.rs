//! Lumen Core - photon map and scene interfaces for offline rendering.
//!
//! This crate provides:
//!
//! - **Photon map**: `Photon` samples and the `PhotonMap` octree that
//!   localizes them near a query point
//! - **Scene interface**: the `SceneView` trait the renderer consumes
//! - **Surface interfaces**: `Material` and `Primitive` traits with the
//!   stock diffuse models and sphere primitive
//!
//! # Example
//!
//! ```
//! use lumen_core::{Photon, PhotonMap};
//! use lumen_math::{Aabb, Vec3};
//!
//! let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
//! let photons = vec![Photon::new(Vec3::splat(2.0), Vec3::ONE)];
//! let map = PhotonMap::build(bounds, photons, 8, 4.0);
//! let near = map.photons_at(Vec3::splat(1.0)).count();
//! assert_eq!(near, 1);
//! ```

pub mod material;
pub mod octree;
pub mod photon;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use material::{Lambertian, Material, OrenNayar};
pub use octree::{Cell, PhotonMap};
pub use photon::Photon;
pub use primitive::{Primitive, RenderGroup, Sphere};
pub use scene::{RayHit, SceneView};
