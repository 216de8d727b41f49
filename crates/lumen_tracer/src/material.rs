//! Materials describing how light scatters at a surface.

use lumen_math::{unit_vector, Vec3};
use rand::RngCore;

use crate::random::{gen_f32, random_in_unit_sphere};
use crate::{HitRecord, Ray};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel factor applied to everything seen along `scattered`
    pub attenuation: Color,
    /// Outgoing ray leaving the hit point
    pub scattered: Ray,
}

/// Closed set of surface materials.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian(Lambertian::new(albedo))
    }

    /// Metal with the given albedo; `fuzz` is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal(Metal::new(albedo, fuzz))
    }

    /// Clear dielectric with the given refractive index.
    pub fn dielectric(refractive_index: f32) -> Self {
        Self::Dielectric(Dielectric::new(refractive_index))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Self::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Self::Metal(m) => m.scatter(ray_in, rec, rng),
            Self::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Self::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Self::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Self::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        // Aim at a random point in the unit sphere tangent to the surface
        let target = rec.p + rec.normal + random_in_unit_sphere(rng);
        Some(Scatter {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, target - rec.p),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
        let scattered = Ray::new(rec.p, reflected + self.fuzz * random_in_unit_sphere(rng));

        // Rays pushed below the surface are absorbed
        if scattered.direction().dot(rec.normal) > 0.0 {
            Some(Scatter {
                attenuation: self.albedo,
                scattered,
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    refractive_index: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refractive_index: f32) -> Self {
        Self { refractive_index }
    }

    pub fn refractive_index(&self) -> f32 {
        self.refractive_index
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let direction = ray_in.direction();
        let ri = self.refractive_index;
        let d_dot_n = direction.dot(rec.normal);

        // Normals point outward, so a positive dot means we are leaving the medium
        let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
            (-rec.normal, ri, ri * d_dot_n / direction.length())
        } else {
            (rec.normal, 1.0 / ri, -d_dot_n / direction.length())
        };

        let scattered_dir = match refract(direction, outward_normal, ni_over_nt) {
            Some(refracted) if gen_f32(rng) >= schlick(cosine, ri) => refracted,
            _ => reflect(direction, rec.normal),
        };

        Some(Scatter {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` (Snell's law).
///
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = unit_vector(v);
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    fn record(material: &Material, normal: Vec3) -> HitRecord<'_> {
        HitRecord {
            t: 1.0,
            p: Vec3::new(0.0, 1.0, 0.0),
            normal,
            material,
        }
    }

    fn incoming_directions(rng: &mut StdRng) -> Vec<Vec3> {
        (0..200)
            .map(|_| random_in_unit_sphere(rng))
            .filter(|d| d.length_squared() > 1e-4)
            .collect()
    }

    #[test]
    fn test_lambertian_always_scatters_with_albedo() {
        let albedo = Color::new(0.8, 0.3, 0.1);
        let material = Material::lambertian(albedo);
        let rec = record(&material, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);

        for dir in incoming_directions(&mut rng) {
            let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), dir);
            let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();

            assert_eq!(scatter.attenuation, albedo);
            assert_eq!(scatter.scattered.origin(), rec.p);
            // Direction is the normal plus a point inside the unit sphere
            assert!((scatter.scattered.direction() - rec.normal).length() < 1.0 + EPS);
        }
    }

    #[test]
    fn test_metal_without_fuzz_is_a_mirror() {
        let material = Material::metal(Color::new(0.7, 0.6, 0.5), 0.0);
        let normal = Vec3::Y;
        let rec = record(&material, normal);
        let mut rng = StdRng::seed_from_u64(2);

        let incident = Vec3::new(1.0, -2.0, 0.5);
        let ray = Ray::new(Vec3::new(-1.0, 3.0, -0.5), incident);
        let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();

        let reflected = scatter.scattered.direction();
        let unit_incident = unit_vector(incident);
        assert!((reflected.dot(normal) - (-unit_incident).dot(normal)).abs() < EPS);
        // Tangential component is preserved
        assert!((reflected.x - unit_incident.x).abs() < EPS);
        assert!((reflected.z - unit_incident.z).abs() < EPS);
        assert_eq!(scatter.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_absorbs_rays_leaving_below_surface() {
        let material = Material::metal(Color::ONE, 0.0);
        let rec = record(&material, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(3);

        // Travelling along the normal: the mirror direction points into the surface
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, 1.0, 0.0));
        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 5.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::ONE, 0.25).fuzz(), 0.25);
    }

    #[test]
    fn test_dielectric_never_absorbs_and_is_colorless() {
        let material = Material::dielectric(1.5);
        let rec = record(&material, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(4);

        // Both entering and exiting rays
        for dir in incoming_directions(&mut rng) {
            let ray = Ray::new(rec.p - dir, dir);
            let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(scatter.attenuation, Color::ONE);
            assert_eq!(scatter.scattered.origin(), rec.p);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        let rec = record(&material, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(5);

        // Leaving glass at a grazing angle: sin(theta) * 1.5 > 1
        let dir = Vec3::new(1.0, 0.1, 0.0);
        let ray = Ray::new(rec.p - dir, dir);
        for _ in 0..50 {
            let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(scatter.scattered.direction(), reflect(dir, Vec3::Y));
        }
    }

    #[test]
    fn test_dielectric_normal_incidence_mostly_refracts() {
        let material = Material::dielectric(1.5);
        let rec = record(&material, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(6);

        let dir = Vec3::NEG_Y;
        let ray = Ray::new(rec.p - dir, dir);
        let refracted = (0..1000)
            .filter(|_| {
                let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();
                scatter.scattered.direction().y < 0.0
            })
            .count();

        // Schlick reflectance at normal incidence is 4%
        assert!(refracted > 900, "only {refracted} of 1000 rays refracted");
    }

    #[test]
    fn test_refract_straight_through_at_normal_incidence() {
        let refracted = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((refracted - Vec3::NEG_Y).length() < EPS);
    }

    #[test]
    fn test_refract_fails_past_critical_angle() {
        assert!(refract(Vec3::new(1.0, -0.1, 0.0), Vec3::Y, 1.5).is_none());
    }

    #[test]
    fn test_schlick_at_normal_incidence_is_r0() {
        let r0 = ((1.0f32 - 1.5) / (1.0 + 1.5)).powi(2);
        assert!((schlick(1.0, 1.5) - r0).abs() < 1e-7);
        assert!((r0 - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_schlick_grows_toward_grazing() {
        let mut previous = schlick(1.0, 1.5);
        for i in (0..10).rev() {
            let cosine = i as f32 / 10.0;
            let current = schlick(cosine, 1.5);
            assert!(current > previous, "schlick({cosine}) = {current} <= {previous}");
            previous = current;
        }
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }
}
