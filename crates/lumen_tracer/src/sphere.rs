//! Sphere primitive for ray tracing.

use std::sync::Arc;

use lumen_math::{Interval, Vec3};

use crate::{HitRecord, Material, Ray};

/// A sphere primitive.
///
/// The material is shared; many spheres may point at the same one.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius is taken as given. A zero radius yields non-finite normals
    /// instead of an error.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Intersect `ray` with the sphere, preferring the near root.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        [(-b - sqrtd) / a, (-b + sqrtd) / a]
            .into_iter()
            .find(|&root| ray_t.surrounds(root))
            .map(|t| {
                let p = ray.at(t);
                HitRecord {
                    t,
                    p,
                    normal: (p - self.center) / self.radius,
                    material: self.material.as_ref(),
                }
            })
    }
}
