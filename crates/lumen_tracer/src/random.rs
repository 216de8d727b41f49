//! Sampling helpers shared by the camera and the materials.
//!
//! Every pixel gets its own generator, derived from the render seed and the
//! pixel offset, so the image does not depend on which worker traced it.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Rejection-sample a point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = 2.0 * Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng)) - Vec3::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Rejection-sample a point strictly inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(2.0 * gen_f32(rng) - 1.0, 2.0 * gen_f32(rng) - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Generator for one pixel of a render seeded with `seed`.
pub fn pixel_rng(seed: u64, offset: usize) -> StdRng {
    let stream = seed.wrapping_add((offset as u64).wrapping_add(1).wrapping_mul(GOLDEN_GAMMA));
    StdRng::seed_from_u64(mix64(stream))
}
