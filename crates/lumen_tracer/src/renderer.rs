//! Multithreaded path tracing renderer.
//!
//! A [`Raytracer`] owns its settings, the output buffer and a shared pixel
//! cursor. Each render spawns `threads` workers that claim pixel offsets
//! from the cursor until the image is exhausted; every pixel is written
//! exactly once, from its own random stream, so the result does not depend
//! on how the work was split.

use std::sync::OnceLock;
use std::time::Instant;

use lumen_core::{RenderSettings, SceneDescription};
use lumen_math::Interval;
use rand::RngCore;

use crate::dispatch::{dispatch, WorkCursor};
use crate::random::{gen_f32, pixel_rng};
use crate::scene::build_world;
use crate::{Camera, Color, Hitable, ImageBuffer, Ray, RenderError, RenderResult};

/// Rays must travel at least this far before a hit counts.
pub const HIT_EPSILON: f32 = 0.001;

/// Compute the color carried back along `ray`.
///
/// Follows the path one bounce at a time, multiplying the attenuation of
/// every scatter. A path that escapes returns the sky; one that is absorbed
/// or still hitting geometry after `max_depth` scatters returns black.
pub fn trace(ray: &Ray, world: &Hitable, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    let mut depth = 0;

    loop {
        let Some(rec) = world.hit(&ray, Interval::new(HIT_EPSILON, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        if depth >= max_depth {
            return Color::ZERO;
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
                depth += 1;
            }
            None => return Color::ZERO,
        }
    }
}

/// Background seen by rays that leave the scene: white at the horizon
/// blending to light blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::ONE + t * Color::new(0.5, 0.7, 1.0)
}

/// Gamma 2 correction.
#[inline]
pub fn gamma_correct(color: Color) -> Color {
    Color::new(color.x.sqrt(), color.y.sqrt(), color.z.sqrt())
}

/// Image-plane coordinates for a buffer offset.
///
/// Offset 0 is the top-left of the image and maps to `y = height`, so the
/// top row samples `v` in `[1, 1 + 1/height)`.
#[inline]
pub fn pixel_coordinates(offset: usize, width: usize, height: usize) -> (usize, usize) {
    (offset % width, height - offset / width)
}

/// Average `samples` jittered paths through pixel (x, y) and gamma correct.
pub fn render_pixel(
    camera: &Camera,
    world: &Hitable,
    x: usize,
    y: usize,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let width = settings.width as f32;
    let height = settings.height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples {
        let u = (x as f32 + gen_f32(rng)) / width;
        let v = (y as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += trace(&ray, world, settings.max_depth, rng);
    }

    gamma_correct(pixel_color / settings.samples as f32)
}

/// CPU path tracer with a fixed configuration.
#[derive(Debug)]
pub struct Raytracer {
    settings: RenderSettings,
    output: ImageBuffer,
    current_output_offset: WorkCursor,
}

impl Raytracer {
    /// Create a tracer, rejecting settings that cannot produce an image.
    pub fn new(settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;

        Ok(Self {
            output: ImageBuffer::new(settings.width, settings.height),
            current_output_offset: WorkCursor::new(settings.pixel_count()),
            settings,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// The last completed image. Black before the first render.
    pub fn output(&self) -> &ImageBuffer {
        &self.output
    }

    /// Pixels of the last completed image, row 0 at the top.
    pub fn output_buffer(&self) -> &[Color] {
        self.output.pixels()
    }

    /// Take the output image, consuming the tracer.
    pub fn into_output(self) -> ImageBuffer {
        self.output
    }

    /// Render `world` as seen by `camera` into the output buffer.
    ///
    /// Blocks until every worker has been joined. On error the previous
    /// output is left untouched.
    pub fn render(&mut self, camera: &Camera, world: &Hitable) -> RenderResult<()> {
        let start = Instant::now();
        let seed = self.settings.seed.unwrap_or_else(rand::random);
        let width = self.settings.width as usize;
        let height = self.settings.height as usize;
        let total = self.settings.pixel_count();

        log::info!(
            "Rendering {}x{} at {} spp, max depth {}, {} threads (seed {})",
            width,
            height,
            self.settings.samples,
            self.settings.max_depth,
            self.settings.threads,
            seed
        );

        self.current_output_offset.reset();
        let slots: Vec<OnceLock<Color>> = (0..total).map(|_| OnceLock::new()).collect();

        let settings = &self.settings;
        let slots_ref = &slots;
        let counts = dispatch(&self.current_output_offset, settings.threads, |_| {
            move |offset: usize| -> RenderResult<()> {
                let (x, y) = pixel_coordinates(offset, width, height);
                let mut rng = pixel_rng(seed, offset);
                let color = render_pixel(camera, world, x, y, settings, &mut rng);
                slots_ref[offset]
                    .set(color)
                    .map_err(|_| RenderError::DuplicateWrite(offset))
            }
        })?;
        log::debug!("Pixels per worker: {counts:?}");

        let pixels = slots
            .into_iter()
            .enumerate()
            .map(|(offset, slot)| slot.into_inner().ok_or(RenderError::IncompleteBuffer(offset)))
            .collect::<RenderResult<Vec<_>>>()?;
        self.output = ImageBuffer::from_pixels(self.settings.width, self.settings.height, pixels)?;

        log::info!("Render finished in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Build the world and camera for `scene` and render it.
    pub fn render_scene(&mut self, scene: &SceneDescription) -> RenderResult<()> {
        let world = build_world(scene)?;
        let camera = Camera::from_description(&scene.camera, self.settings.aspect_ratio());
        self.render(&camera, &world)
    }
}
