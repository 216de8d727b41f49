//! Build tracer geometry from a scene description.

use std::sync::Arc;

use lumen_core::{MaterialDescription, SceneDescription};

use crate::{Hitable, HitableList, Material, RenderResult, Sphere};

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        match *desc {
            MaterialDescription::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDescription::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDescription::Dielectric { refractive_index } => {
                Material::dielectric(refractive_index)
            }
        }
    }
}

/// Turn a validated description into the scene root.
///
/// Each material table entry becomes one shared allocation; spheres that
/// reference the same entry share it.
pub fn build_world(desc: &SceneDescription) -> RenderResult<Hitable> {
    desc.validate()?;

    let materials: Vec<Arc<Material>> = desc
        .materials
        .iter()
        .map(|m| Arc::new(Material::from(m)))
        .collect();

    let world: HitableList = desc
        .spheres
        .iter()
        .map(|s| {
            Hitable::from(Sphere::new(
                s.center,
                s.radius,
                Arc::clone(&materials[s.material]),
            ))
        })
        .collect();

    log::debug!(
        "Built world: {} spheres sharing {} materials",
        world.len(),
        materials.len()
    );

    Ok(Hitable::List(world))
}
