//! Simple path tracer example.
//!
//! Renders three spheres on a ground plane and saves to PPM format.

use lumen_core::{CameraDescription, MaterialDescription, RenderSettings, SceneDescription};
use lumen_tracer::{Raytracer, Vec3};

fn build_scene() -> SceneDescription {
    let camera = CameraDescription::new(Vec3::new(3.0, 3.0, 2.0), Vec3::new(0.0, 0.0, -1.0), 20.0)
        .with_lens(0.5, (Vec3::new(3.0, 3.0, 2.0) - Vec3::new(0.0, 0.0, -1.0)).length());
    let mut scene = SceneDescription::new(camera);

    let ground = scene.add_material(MaterialDescription::Lambertian {
        albedo: Vec3::new(0.8, 0.8, 0.0),
    });
    let blue = scene.add_material(MaterialDescription::Lambertian {
        albedo: Vec3::new(0.1, 0.2, 0.5),
    });
    let gold = scene.add_material(MaterialDescription::Metal {
        albedo: Vec3::new(0.8, 0.6, 0.2),
        fuzz: 0.0,
    });
    let glass = scene.add_material(MaterialDescription::Dielectric {
        refractive_index: 1.5,
    });

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground);
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, blue);
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold);
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass);
    scene
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = build_scene();
    let settings = RenderSettings::new(400, 200).with_quality(50, 20).with_seed(1);

    let mut tracer = Raytracer::new(settings)?;
    tracer.render_scene(&scene)?;
    tracer.output().save("simple_render.ppm")?;

    println!("Saved simple_render.ppm");
    Ok(())
}
