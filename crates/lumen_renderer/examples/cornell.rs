//! Cornell-style sphere scene rendered in all three modes.
//!
//! Builds a walled room out of large spheres, traces photons from the
//! ceiling light into a photon map, then renders the scene with plain
//! path tracing, photon-map-assisted path tracing, and the photon map
//! visualization, saving one TGA file per mode.

use std::sync::Arc;
use std::time::Instant;

use lumen_core::{
    Lambertian, Material, OrenNayar, Photon, PhotonMap, RayHit, RenderGroup, SceneView, Sphere,
};
use lumen_math::{Aabb, Ray, Vec3};
use lumen_renderer::{Camera, ImagePlane, RenderConfig, RenderMode};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Lumen Photon Mapper - Cornell Example");
    println!("=====================================");

    let start = Instant::now();
    let mut scene = build_scene();
    scene.build_photon_map(20_000, 7);
    println!("Scene and photon map built in {:?}", start.elapsed());

    // Looking down -Z into the room through a quad just outside the
    // opening. Corner order makes the plane normal face +Z so every
    // sample weight is positive.
    let eye = Vec3::new(0.0, 0.0, 9.0);
    let plane = ImagePlane::new(
        Vec3::new(-3.0, -3.0, 6.0),
        Vec3::new(-3.0, 3.0, 6.0),
        Vec3::new(3.0, 3.0, 6.0),
        Vec3::new(3.0, -3.0, 6.0),
    );

    let modes = [
        (RenderMode::PathTrace, "pathtrace.tga"),
        (RenderMode::PathTraceWithPhotonMap, "photonmap.tga"),
        (RenderMode::VisualizePhotonMap, "visualize.tga"),
    ];

    for (mode, filename) in modes {
        let mut camera = Camera::new(400, 400);
        let config = RenderConfig {
            mode,
            samples_per_pixel: 64,
            max_bounce: 3,
            max_depth: 5,
            seed: 1,
        };

        let start = Instant::now();
        camera.render(&scene, &config, eye, &plane)?;
        println!("{mode:?} rendered in {:?}", start.elapsed());

        camera.quantize()?;
        camera.write_tga(filename)?;
        println!("Saved to {filename}");
    }

    Ok(())
}

fn build_scene() -> SphereScene {
    let mut groups = Vec::new();

    // Walls: huge spheres standing in for planes.
    let wall_radius = 1000.0;
    let walls = [
        (Vec3::new(-wall_radius - 4.0, 0.0, 0.0), Vec3::new(0.75, 0.25, 0.25)),
        (Vec3::new(wall_radius + 4.0, 0.0, 0.0), Vec3::new(0.25, 0.75, 0.25)),
        (Vec3::new(0.0, -wall_radius - 4.0, 0.0), Vec3::new(0.75, 0.75, 0.75)),
        (Vec3::new(0.0, wall_radius + 4.0, 0.0), Vec3::new(0.75, 0.75, 0.75)),
        (Vec3::new(0.0, 0.0, -wall_radius - 4.0), Vec3::new(0.75, 0.75, 0.75)),
    ];
    for (center, color) in walls {
        let mut group = RenderGroup::new(Arc::new(OrenNayar::new(color, 0.8, 1.0)));
        group.add(Box::new(Sphere::new(center, wall_radius)));
        groups.push(group);
    }

    // Two diffuse spheres on the floor.
    let mut group = RenderGroup::new(Arc::new(Lambertian::new(
        Vec3::new(0.3, 0.4, 0.8),
        Vec3::ZERO,
    )));
    group.add(Box::new(Sphere::new(Vec3::new(-1.5, -2.5, 1.0), 1.5)));
    groups.push(group);

    let mut group = RenderGroup::new(Arc::new(OrenNayar::new(Vec3::new(0.9, 0.8, 0.5), 0.3, 1.0)));
    group.add(Box::new(Sphere::new(Vec3::new(2.0, -2.9, -1.0), 1.1)));
    groups.push(group);

    // Ceiling light.
    let mut group = RenderGroup::new(Arc::new(Lambertian::new(
        Vec3::ONE,
        Vec3::new(15.0, 15.0, 15.0),
    )));
    group.add(Box::new(Sphere::new(Vec3::new(0.0, 4.5, 0.0), 1.0)));
    groups.push(group);

    let room = Aabb::from_points(Vec3::splat(-5.0), Vec3::splat(5.0));
    SphereScene::new(groups, room)
}

/// A concrete scene: render groups of spheres, a room volume, and a small
/// diffuse path integrator standing in for the full light-transport stack.
struct SphereScene {
    groups: Vec<RenderGroup>,
    bounds: Aabb,
    photon_map: Option<PhotonMap>,
}

impl SphereScene {
    fn new(groups: Vec<RenderGroup>, bounds: Aabb) -> Self {
        Self {
            groups,
            bounds,
            photon_map: None,
        }
    }

    /// Trace photons from the emissive groups and build the spatial index
    /// over where they land.
    fn build_photon_map(&mut self, photon_count: usize, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut photons = Vec::with_capacity(photon_count);

        let lights: Vec<usize> = (0..self.groups.len())
            .filter(|&g| self.groups[g].material.is_emissive())
            .collect();
        if lights.is_empty() {
            self.photon_map = Some(PhotonMap::build(self.bounds, photons, 32, 1.0));
            return;
        }

        let power_scale = lights.len() as f32 / photon_count as f32;
        while photons.len() < photon_count {
            let light = lights[photons.len() % lights.len()];
            let light_bounds = self.groups[light].bounds();
            let direction = random_unit_vector(&mut rng);
            // Start just outside the emitting surface so the photon does
            // not hit the light itself.
            let origin = light_bounds.center() + 0.51 * light_bounds.max_extent() * direction;
            let ray = Ray::new(origin, direction);

            if let Some((hit, point)) = self.closest_hit(&ray) {
                let material = self.groups[hit.group].material.as_ref();
                if material.is_emissive() {
                    continue;
                }
                let power =
                    power_scale * self.groups[light].material.emission_color()
                        * material.surface_color();
                photons.push(Photon::new(point, power));
            }
        }

        self.photon_map = Some(PhotonMap::build(self.bounds, photons, 32, 1.0));
    }

    fn closest_hit(&self, ray: &Ray) -> Option<(RayHit, Vec3)> {
        let mut best: Option<(RayHit, Vec3)> = None;
        for (g, group) in self.groups.iter().enumerate() {
            for (p, primitive) in group.primitives.iter().enumerate() {
                if let Some(point) = primitive.intersect(ray) {
                    let distance = (point - ray.origin()).length();
                    if best.as_ref().map_or(true, |(hit, _)| distance < hit.distance) {
                        best = Some((
                            RayHit {
                                group: g,
                                primitive: p,
                                distance,
                            },
                            point,
                        ));
                    }
                }
            }
        }
        best
    }

    /// Diffuse path integrator. With `gather` set, the first diffuse hit
    /// also collects photon power from the map's nearest cell.
    fn radiance(
        &self,
        ray: &Ray,
        bounce: u32,
        depth: u32,
        rng: &mut dyn RngCore,
        gather: bool,
    ) -> Vec3 {
        if depth == 0 {
            return Vec3::ZERO;
        }
        let Some((hit, point)) = self.closest_hit(ray) else {
            return Vec3::ZERO;
        };

        let group = &self.groups[hit.group];
        let material = group.material.as_ref();
        if material.is_emissive() {
            return material.emission_color();
        }

        let normal = group.primitives[hit.primitive].normal_at(point);

        let mut gathered = Vec3::ZERO;
        if gather {
            if let Some(map) = &self.photon_map {
                let local: Vec3 = map.photons_at(point).map(|p| p.power).sum();
                gathered = local * material.surface_color();
            }
        }

        if bounce == 0 {
            return gathered;
        }

        let out_dir = random_unit_vector(rng);
        let out_dir = if out_dir.dot(normal) < 0.0 { -out_dir } else { out_dir };
        let bounced = Ray::new(point, out_dir);
        // Gather once, at the primary hit only.
        let incoming = self.radiance(&bounced, bounce - 1, depth - 1, rng, false);

        gathered + material.brdf(out_dir, -ray.direction(), normal, incoming)
    }
}

impl SceneView for SphereScene {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn photon_map(&self) -> Option<&PhotonMap> {
        self.photon_map.as_ref()
    }

    fn trace_ray(&self, ray: &Ray, max_bounce: u32, max_depth: u32, rng: &mut dyn RngCore) -> Vec3 {
        self.radiance(ray, max_bounce, max_depth, rng, false)
    }

    fn trace_ray_with_photon_map(
        &self,
        ray: &Ray,
        max_bounce: u32,
        max_depth: u32,
        rng: &mut dyn RngCore,
    ) -> Vec3 {
        self.radiance(ray, max_bounce, max_depth, rng, true)
    }

    fn ray_cast(&self, ray: &Ray) -> Option<RayHit> {
        self.closest_hit(ray).map(|(hit, _)| hit)
    }
}

/// Sample a uniformly distributed unit direction.
fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        let len_sq = p.length_squared();
        if len_sq > 1e-6 && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}
