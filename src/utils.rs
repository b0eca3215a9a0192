//! Utils

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::{Color, Vec3};

/// Mirror-reflect `v` about `n`
///
/// `n` must be unit length; callers normalize it first.
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Normalize a vector, passing a zero vector through unchanged
///
/// Degenerate subtractions (light exactly at the hit point, etc.) hand
/// us zero-length vectors often enough that this is a normal path, not
/// an error.
pub fn safe_normalize(v: &Vec3) -> Vec3 {
    let norm = v.norm();
    if norm == 0.0 {
        *v
    } else {
        v / norm
    }
}

/// Clamp each channel to [0, 1]
pub fn clamp_color(color: &Color) -> Color {
    Color::new(
        color[0].clamp(0.0, 1.0),
        color[1].clamp(0.0, 1.0),
        color[2].clamp(0.0, 1.0),
    )
}

/// Quantize a clamped color for the output image
pub fn to_rgb(color: &Color) -> Rgb<u8> {
    Rgb([
        scale_color(color[0]),
        scale_color(color[1]),
        scale_color(color[2]),
    ])
}

/// scale the color to between 0 and 255
fn scale_color(val: f64) -> u8 {
    (256.0 * val.min(0.999).max(0.0)) as u8
}

/// Vector representation used by the YAML-facing config structs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SerdeVector(pub [f64; 3]);

impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.0[0], v.0[1], v.0[2])
    }
}

impl From<Vec3> for SerdeVector {
    fn from(v: Vec3) -> Self {
        Self([v[0], v[1], v[2]])
    }
}
