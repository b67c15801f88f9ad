//! Primitive trait, sphere geometry, and render groups.

use std::sync::Arc;

use lumen_math::{Aabb, Ray, Vec3};

use crate::material::Material;

/// Minimum hit distance; intersections closer than this are treated as
/// self-intersections and ignored.
const T_MIN: f32 = 1e-3;

/// Trait for geometry the scene can cast rays against.
pub trait Primitive: Send + Sync {
    /// Compute the ray intersection point, if any.
    fn intersect(&self, ray: &Ray) -> Option<Vec3>;

    /// Surface normal at a point on the primitive.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Axis-aligned bounds of the primitive.
    fn bounds(&self) -> Aabb;
}

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Take the nearest root in front of the origin.
        let mut root = (h - sqrtd) / a;
        if root <= T_MIN {
            root = (h + sqrtd) / a;
            if root <= T_MIN {
                return None;
            }
        }

        Some(ray.at(root))
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    fn bounds(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}

/// A group of primitives sharing one material.
pub struct RenderGroup {
    pub material: Arc<dyn Material>,
    pub primitives: Vec<Box<dyn Primitive>>,
}

impl RenderGroup {
    /// Create an empty group with the given material.
    pub fn new(material: Arc<dyn Material>) -> Self {
        Self {
            material,
            primitives: Vec::new(),
        }
    }

    /// Add a primitive to the group.
    pub fn add(&mut self, primitive: Box<dyn Primitive>) {
        self.primitives.push(primitive);
    }

    /// Bounds surrounding every primitive in the group.
    pub fn bounds(&self) -> Aabb {
        self.primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    #[test]
    fn test_sphere_intersection() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let p = sphere.intersect(&ray).unwrap();
        assert!((p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);

        let miss = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&miss).is_none());
    }

    #[test]
    fn test_sphere_intersection_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);

        // Origin inside the sphere: the near root is behind, the far
        // root is the exit point.
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let p = sphere.intersect(&ray).unwrap();
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        let n = sphere.normal_at(Vec3::new(3.0, 0.0, 0.0));
        assert!((n - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_render_group_bounds() {
        let mut group = RenderGroup::new(Arc::new(Lambertian::new(Vec3::ONE, Vec3::ZERO)));
        group.add(Box::new(Sphere::new(Vec3::ZERO, 1.0)));
        group.add(Box::new(Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0)));

        let bounds = group.bounds();
        assert_eq!(bounds.x.min, -1.0);
        assert_eq!(bounds.x.max, 6.0);
    }
}
