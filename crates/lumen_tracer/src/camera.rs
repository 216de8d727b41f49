//! Thin-lens camera for ray generation.

use lumen_core::CameraDescription;
use lumen_math::Vec3;
use rand::RngCore;

use crate::random::random_in_unit_disk;
use crate::Ray;

/// Camera for generating rays into the scene.
///
/// Fully determined at construction; rays for the same image-plane point
/// leave from different spots on the lens and meet again on the focus plane.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: image width over height
    /// - `aperture`: lens diameter, 0 for a pinhole
    /// - `focus_dist`: distance from the lens to the plane of perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        // Right-handed basis: w points backwards, u right, v up
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let lower_left_corner = origin
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        }
    }

    /// Build a camera from a scene description for an image of the given aspect.
    pub fn from_description(desc: &CameraDescription, aspect: f32) -> Self {
        Self::new(
            desc.look_from,
            desc.look_at,
            desc.vup,
            desc.vfov,
            aspect,
            desc.aperture,
            desc.focus_distance(),
        )
    }

    /// Generate a ray through image-plane point (s, t), origin bottom-left.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        let origin = self.origin + offset;

        Ray::new(
            origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - origin,
        )
    }

    /// Lens center.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Camera basis `(u, v, w)`: right, up, backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}
