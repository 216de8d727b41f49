//! Scene description types for Lumen.
//!
//! A description is plain data: a camera, a material table and a list of
//! spheres that reference materials by index. Several spheres may point at
//! the same material entry. The tracer turns a description into its own
//! geometry; this module only knows how to build, validate, and persist one.

use std::fs;
use std::path::Path;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {sphere} references material {material}, but only {count} materials exist")]
    MissingMaterial {
        sphere: usize,
        material: usize,
        count: usize,
    },

    #[error("Sphere {sphere} has non-positive radius {radius}")]
    InvalidRadius { sphere: usize, radius: f32 },

    #[error("Scene contains no spheres")]
    Empty,
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Viewpoint and lens of the scene camera.
///
/// The aspect ratio is not part of the description; it comes from the
/// output resolution at render time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub look_from: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_vup")]
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter; 0 disables depth of field
    #[serde(default)]
    pub aperture: f32,
    /// Distance to the plane in perfect focus; defaults to |look_from - look_at|
    #[serde(default)]
    pub focus_dist: Option<f32>,
}

fn default_vup() -> Vec3 {
    Vec3::Y
}

impl CameraDescription {
    /// Pinhole camera looking from `look_from` at `look_at` with +Y up.
    pub fn new(look_from: Vec3, look_at: Vec3, vfov: f32) -> Self {
        Self {
            look_from,
            look_at,
            vup: Vec3::Y,
            vfov,
            aperture: 0.0,
            focus_dist: None,
        }
    }

    /// Set lens settings.
    pub fn with_lens(mut self, aperture: f32, focus_dist: f32) -> Self {
        self.aperture = aperture;
        self.focus_dist = Some(focus_dist);
        self
    }

    /// Effective focus distance.
    pub fn focus_distance(&self) -> f32 {
        self.focus_dist
            .unwrap_or_else(|| (self.look_from - self.look_at).length())
    }
}

/// Surface response of a material table entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    /// Diffuse reflector
    Lambertian { albedo: Vec3 },
    /// Specular reflector; `fuzz` is clamped to [0, 1] by the tracer
    Metal { albedo: Vec3, fuzz: f32 },
    /// Clear refractive surface
    Dielectric { refractive_index: f32 },
}

/// A sphere and the index of its material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: usize,
}

/// A complete scene: camera, materials and spheres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene seen through `camera`.
    pub fn new(camera: CameraDescription) -> Self {
        Self {
            camera,
            materials: Vec::new(),
            spheres: Vec::new(),
        }
    }

    /// Append a material and return its index.
    pub fn add_material(&mut self, material: MaterialDescription) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Append a sphere using the material at `material`.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: usize) {
        self.spheres.push(SphereDescription {
            center,
            radius,
            material,
        });
    }

    /// Number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Number of material table entries.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Check material references and radii.
    pub fn validate(&self) -> SceneResult<()> {
        if self.spheres.is_empty() {
            return Err(SceneError::Empty);
        }

        for (i, sphere) in self.spheres.iter().enumerate() {
            if sphere.material >= self.materials.len() {
                return Err(SceneError::MissingMaterial {
                    sphere: i,
                    material: sphere.material,
                    count: self.materials.len(),
                });
            }
            // Negated so NaN radii are rejected too
            if !(sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    sphere: i,
                    radius: sphere.radius,
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scene file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;

        log::info!(
            "Loaded scene {}: {} spheres, {} materials",
            path.display(),
            scene.sphere_count(),
            scene.material_count()
        );

        Ok(scene)
    }

    /// Write the scene to disk as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SceneResult<()> {
        fs::write(path.as_ref(), self.to_json_string()?)?;
        log::debug!("Wrote scene to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SPHERES: &str = r#"{
        "camera": { "look_from": [0.0, 1.0, 5.0], "look_at": [0.0, 0.0, 0.0], "vfov": 45.0 },
        "materials": [
            { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
            { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.3 },
            { "type": "dielectric", "refractive_index": 1.5 }
        ],
        "spheres": [
            { "center": [0.0, -1000.0, 0.0], "radius": 1000.0, "material": 0 },
            { "center": [0.0, 1.0, 0.0], "radius": 1.0, "material": 2 }
        ]
    }"#;

    fn one_sphere(radius: f32, material: usize) -> SceneDescription {
        let mut scene = SceneDescription::new(CameraDescription::new(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::ZERO,
            60.0,
        ));
        scene.add_material(MaterialDescription::Lambertian {
            albedo: Vec3::splat(0.5),
        });
        scene.add_sphere(Vec3::ZERO, radius, material);
        scene
    }

    #[test]
    fn test_parse_scene_json() {
        let scene = SceneDescription::from_json_str(TWO_SPHERES).unwrap();

        assert_eq!(scene.sphere_count(), 2);
        assert_eq!(scene.material_count(), 3);
        assert_eq!(scene.camera.vup, Vec3::Y);
        assert_eq!(scene.camera.aperture, 0.0);
        assert_eq!(
            scene.materials[1],
            MaterialDescription::Metal {
                albedo: Vec3::new(0.8, 0.6, 0.2),
                fuzz: 0.3
            }
        );
        assert_eq!(scene.spheres[1].material, 2);
    }

    #[test]
    fn test_focus_distance_defaults_to_look_distance() {
        let camera = CameraDescription::new(Vec3::new(0.0, 3.0, 4.0), Vec3::ZERO, 30.0);
        assert!((camera.focus_distance() - 5.0).abs() < 1e-6);

        let camera = camera.with_lens(0.2, 10.0);
        assert_eq!(camera.focus_distance(), 10.0);
    }

    #[test]
    fn test_missing_material_rejected() {
        let err = one_sphere(1.0, 3).validate().unwrap_err();
        assert!(matches!(
            err,
            SceneError::MissingMaterial {
                sphere: 0,
                material: 3,
                count: 1
            }
        ));
    }

    #[test]
    fn test_bad_radius_rejected() {
        assert!(matches!(
            one_sphere(0.0, 0).validate(),
            Err(SceneError::InvalidRadius { .. })
        ));
        assert!(matches!(
            one_sphere(-2.0, 0).validate(),
            Err(SceneError::InvalidRadius { .. })
        ));
        assert!(matches!(
            one_sphere(f32::NAN, 0).validate(),
            Err(SceneError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_empty_scene_rejected() {
        let scene = SceneDescription::new(CameraDescription::new(Vec3::Z, Vec3::ZERO, 90.0));
        assert!(matches!(scene.validate(), Err(SceneError::Empty)));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = SceneDescription::from_json_str("{ \"camera\": 3 }").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn test_save_and_load() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scene = SceneDescription::from_json_str(TWO_SPHERES).unwrap();
        let path = std::env::temp_dir().join(format!("lumen_scene_{}.json", std::process::id()));

        scene.save(&path).unwrap();
        let loaded = SceneDescription::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, scene);
    }
}
