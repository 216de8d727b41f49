// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Normalize `v` by dividing through its length.
///
/// A zero-length input yields NaN components; callers that can produce
/// degenerate vectors are expected to live with that.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}
