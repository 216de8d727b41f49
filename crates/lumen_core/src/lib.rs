//! Lumen Core - scene descriptions and render settings.
//!
//! This crate provides:
//!
//! - **Render settings**: output size, sample count, bounce depth, threads
//! - **Scene descriptions**: camera, material table and spheres, loadable from JSON
//! - **Presets**: the procedural `random_scene`
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{RenderSettings, SceneDescription};
//!
//! let scene = SceneDescription::load("scenes/three_spheres.json")?;
//! let settings = RenderSettings::new(400, 200).with_quality(50, 20);
//! println!("{} spheres at {}x{}", scene.sphere_count(), settings.width, settings.height);
//! ```

pub mod presets;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use presets::random_scene;
pub use scene::{
    CameraDescription, MaterialDescription, SceneDescription, SceneError, SceneResult,
    SphereDescription,
};
pub use settings::{default_thread_count, RenderSettings, SettingsError, SettingsResult};
