//! Lumen Tracer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials, seen through a thin-lens camera.
//!
//! Rendering is split across a fixed pool of worker threads that claim
//! pixels from a shared lock-free cursor. Each pixel draws from its own
//! random stream, so a seeded render is identical at any thread count.

mod camera;
mod dispatch;
mod error;
mod hittable;
mod material;
mod output;
mod random;
mod renderer;
mod scene;
mod sphere;

pub use camera::Camera;
pub use dispatch::{dispatch, WorkCursor};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hitable, HitableList};
pub use material::{reflect, refract, schlick, Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use output::{as_bytes, ImageBuffer, Rgba8, CHANNEL_SCALE};
pub use random::pixel_rng;
pub use renderer::{gamma_correct, render_pixel, sky_gradient, trace, Raytracer, HIT_EPSILON};
pub use scene::build_world;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
