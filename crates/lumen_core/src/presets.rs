//! Built-in scenes.

use lumen_math::Vec3;
use rand::Rng;

use crate::scene::{CameraDescription, MaterialDescription, SceneDescription};

/// The classic "many small spheres" cover scene.
///
/// A large grey ground sphere, a 22x22 grid of jittered small spheres with
/// random materials, and three large feature spheres (glass, diffuse, mirror).
/// All glass spheres share one material entry, as does the ground.
pub fn random_scene<R: Rng + ?Sized>(rng: &mut R) -> SceneDescription {
    let camera = CameraDescription::new(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, 20.0)
        .with_lens(0.1, 10.0);
    let mut scene = SceneDescription::new(camera);

    let ground = scene.add_material(MaterialDescription::Lambertian {
        albedo: Vec3::splat(0.5),
    });
    let glass = scene.add_material(MaterialDescription::Dielectric {
        refractive_index: 1.5,
    });

    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    let keep_clear = Vec3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = Vec3::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                scene.add_material(MaterialDescription::Lambertian { albedo })
            } else if choose_mat < 0.95 {
                let albedo = Vec3::new(
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                );
                let fuzz = 0.5 * rng.gen::<f32>();
                scene.add_material(MaterialDescription::Metal { albedo, fuzz })
            } else {
                glass
            };

            scene.add_sphere(center, 0.2, material);
        }
    }

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass);
    let brown = scene.add_material(MaterialDescription::Lambertian {
        albedo: Vec3::new(0.4, 0.2, 0.1),
    });
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown);
    let mirror = scene.add_material(MaterialDescription::Metal {
        albedo: Vec3::new(0.7, 0.6, 0.5),
        fuzz: 0.0,
    });
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, mirror);

    log::debug!(
        "Generated random scene: {} spheres, {} materials",
        scene.sphere_count(),
        scene.material_count()
    );

    scene
}
