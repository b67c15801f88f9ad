//! Material trait and the stock diffuse reflectance models.

use lumen_math::Vec3;

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// True if the material emits light.
    fn is_emissive(&self) -> bool;

    /// The surface (albedo) color.
    fn surface_color(&self) -> Vec3;

    /// The emitted color; black for non-emissive materials.
    fn emission_color(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Evaluate the BRDF: the outgoing radiance given light arriving with
    /// intensity `incoming` along `in_dir` and leaving along `out_dir` at
    /// a surface point with the given `normal`. Both directions point away
    /// from the surface.
    fn brdf(&self, in_dir: Vec3, out_dir: Vec3, normal: Vec3, incoming: Vec3) -> Vec3;
}

fn emissive(emission: Vec3) -> bool {
    emission.x + emission.y + emission.z > 3.0 * f32::EPSILON
}

/// Lambertian (ideal diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    surface_color: Vec3,
    emission_color: Vec3,
    reflectance: f32,
}

impl Lambertian {
    // Small bleed terms that keep deep shadows from going fully black.
    const RADIANCE_GAMMA: f32 = 0.002;
    const SURFACE_GAMMA: f32 = 0.001;

    /// Create a new Lambertian material with the given albedo and
    /// emission colors.
    pub fn new(surface_color: Vec3, emission_color: Vec3) -> Self {
        Self {
            surface_color,
            emission_color,
            reflectance: 1.0,
        }
    }

    /// Set the reflectance factor.
    pub fn with_reflectance(mut self, reflectance: f32) -> Self {
        self.reflectance = reflectance;
        self
    }
}

impl Material for Lambertian {
    fn is_emissive(&self) -> bool {
        emissive(self.emission_color)
    }

    fn surface_color(&self) -> Vec3 {
        self.surface_color
    }

    fn emission_color(&self) -> Vec3 {
        self.emission_color
    }

    fn brdf(&self, in_dir: Vec3, _out_dir: Vec3, normal: Vec3, incoming: Vec3) -> Vec3 {
        let d = in_dir.dot(normal).max(0.0);
        let l = incoming.length();
        let bled = incoming * self.surface_color
            + incoming * Self::RADIANCE_GAMMA
            + self.surface_color * l * Self::SURFACE_GAMMA;
        self.reflectance * d * bled
    }
}

/// Oren-Nayar rough diffuse material.
///
/// See <https://en.wikipedia.org/wiki/Oren-Nayar_reflectance_model>.
#[derive(Debug, Clone)]
pub struct OrenNayar {
    surface_color: Vec3,
    emission_color: Vec3,
    roughness: f32,
    reflectivity: f32,
}

impl OrenNayar {
    /// Create a new Oren-Nayar material.
    ///
    /// - `roughness`: standard deviation of the facet slope distribution
    /// - `reflectivity`: overall reflectance factor
    pub fn new(surface_color: Vec3, roughness: f32, reflectivity: f32) -> Self {
        Self {
            surface_color,
            emission_color: Vec3::ZERO,
            roughness,
            reflectivity,
        }
    }

    /// Set the emission color.
    pub fn with_emission(mut self, emission_color: Vec3) -> Self {
        self.emission_color = emission_color;
        self
    }
}

impl Material for OrenNayar {
    fn is_emissive(&self) -> bool {
        emissive(self.emission_color)
    }

    fn surface_color(&self) -> Vec3 {
        self.surface_color
    }

    fn emission_color(&self) -> Vec3 {
        self.emission_color
    }

    fn brdf(&self, in_dir: Vec3, out_dir: Vec3, normal: Vec3, incoming: Vec3) -> Vec3 {
        let roughness_squared = self.roughness * self.roughness;

        let a = 1.0 - 0.5 * roughness_squared / (roughness_squared + 0.57);
        let b = 0.45 * roughness_squared / (roughness_squared + 0.09);

        let alpha_inclination = normal.dot(-in_dir).acos();
        let beta_inclination = normal.dot(out_dir).acos();
        let gamma = (-in_dir).dot(out_dir);

        let oren =
            a + b * gamma.max(0.0) * alpha_inclination.sin() * beta_inclination.tan();

        self.reflectivity * oren * (incoming * self.surface_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambertian_emissive_flag() {
        let dark = Lambertian::new(Vec3::splat(0.5), Vec3::ZERO);
        assert!(!dark.is_emissive());

        let light = Lambertian::new(Vec3::ONE, Vec3::splat(10.0));
        assert!(light.is_emissive());
        assert_eq!(light.emission_color(), Vec3::splat(10.0));
    }

    #[test]
    fn test_lambertian_foreshortening() {
        let mat = Lambertian::new(Vec3::ONE, Vec3::ZERO);
        let normal = Vec3::Y;
        let out = Vec3::Y;
        let incoming = Vec3::ONE;

        // Light from behind the surface contributes nothing.
        let below = mat.brdf(-Vec3::Y, out, normal, incoming);
        assert_eq!(below, Vec3::ZERO);

        // Grazing light contributes less than light along the normal.
        let grazing = mat.brdf(Vec3::new(0.999, 0.04, 0.0).normalize(), out, normal, incoming);
        let overhead = mat.brdf(Vec3::Y, out, normal, incoming);
        assert!(grazing.x < overhead.x);
    }

    #[test]
    fn test_oren_nayar_zero_roughness_is_lambert_like() {
        // With zero roughness the A term is 1 and B vanishes, leaving the
        // plain product of incoming radiance and surface color.
        let mat = OrenNayar::new(Vec3::new(0.5, 0.5, 0.5), 0.0, 1.0);
        let v = mat.brdf(Vec3::Y, Vec3::Y, Vec3::Y, Vec3::ONE);
        assert!((v - Vec3::splat(0.5)).length() < 1e-5);
    }
}
