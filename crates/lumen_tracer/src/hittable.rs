//! Hitable geometry and HitRecord for ray-object intersection.

use lumen_math::{Interval, Vec3};

use crate::{Material, Ray, Sphere};

/// Record of a ray-object intersection.
///
/// Borrows the material from the geometry that was hit, so it lives only as
/// long as the scene it came from.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, pointing out of the surface
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Anything a ray can be tested against.
#[derive(Debug, Clone)]
pub enum Hitable {
    Sphere(Sphere),
    List(HitableList),
}

impl Hitable {
    /// Test if a ray hits this object with t strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Self::Sphere(sphere) => sphere.hit(ray, ray_t),
            Self::List(list) => list.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Hitable {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<HitableList> for Hitable {
    fn from(list: HitableList) -> Self {
        Self::List(list)
    }
}

/// An ordered list of hitable objects, reporting the nearest hit.
#[derive(Debug, Clone, Default)]
pub struct HitableList {
    objects: Vec<Hitable>,
}

impl HitableList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Hitable>) {
        self.objects.push(object.into());
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest hit across all children.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl FromIterator<Hitable> for HitableList {
    fn from_iter<I: IntoIterator<Item = Hitable>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sphere_at(z: f32, material: &Arc<Material>) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, Arc::clone(material))
    }

    #[test]
    fn test_empty_list_never_hits() {
        let list = HitableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(list.is_empty());
        assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_list_reports_nearest_hit_in_any_order() {
        let near = Arc::new(Material::lambertian(Vec3::X));
        let far = Arc::new(Material::lambertian(Vec3::Y));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let interval = Interval::new(0.001, f32::INFINITY);

        let mut front_first = HitableList::new();
        front_first.add(sphere_at(-2.0, &near));
        front_first.add(sphere_at(-5.0, &far));

        let back_first: HitableList = vec![
            Hitable::from(sphere_at(-5.0, &far)),
            Hitable::from(sphere_at(-2.0, &near)),
        ]
        .into_iter()
        .collect();

        for list in [front_first, back_first] {
            let rec = list.hit(&ray, interval).unwrap();
            assert!((rec.t - 1.5).abs() < 1e-5);
            assert_eq!(*rec.material, *near);
        }
    }

    #[test]
    fn test_list_respects_t_max() {
        let material = Arc::new(Material::lambertian(Vec3::ONE));
        let mut list = HitableList::new();
        list.add(sphere_at(-5.0, &material));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(list.hit(&ray, Interval::new(0.001, 4.0)).is_none());
        assert!(list.hit(&ray, Interval::new(0.001, 5.0)).is_some());
    }

    #[test]
    fn test_nested_lists() {
        let material = Arc::new(Material::lambertian(Vec3::ONE));
        let mut inner = HitableList::new();
        inner.add(sphere_at(-3.0, &material));

        let mut outer = HitableList::new();
        outer.add(inner);
        outer.add(sphere_at(-10.0, &material));

        let world = Hitable::from(outer);
        let rec = world
            .hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!((rec.t - 2.5).abs() < 1e-5);
    }
}
