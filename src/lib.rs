//! Whitted-style ray tracing library
//!
//! Spheres and planes lit by point lights, hard shadows, and mirror
//! reflection bounded by a recursion depth. Scenes are immutable once
//! built; rendering is a pure function from scene + camera to a frame
//! buffer.

use nalgebra::Vector3;
use thiserror::Error;

pub mod cameras;
pub mod lights;
pub mod materials;
pub mod objects;
pub mod render;
pub mod scene;
pub mod shading;
pub mod tracer;
pub mod utils;

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;
pub type Color = Vec3;

/// Minimum ray parameter an intersection must clear.
///
/// Suppresses self-intersection when a secondary ray starts exactly on
/// the surface it just left.
pub const T_MIN: f64 = 1e-3;

/// Offset along the surface normal applied to a hit point before any
/// shadow or reflection ray is cast from it.
pub const NUDGE: f64 = 1e-4;

/// Plane-intersection denominators smaller than this count as a ray
/// parallel to the plane.
pub const PARALLEL_EPS: f64 = 1e-6;

/// Reflection recursion bound used when the scene does not override it.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Prelude
pub mod prelude {
    pub use crate::cameras::Camera;
    pub use crate::lights::Light;
    pub use crate::materials::{Material, SharedMaterial};
    pub use crate::objects::{Plane, Sphere};
    pub use crate::render::{render, FrameBuffer, RenderSettings};
    pub use crate::scene::Scene;
    pub use crate::shading::ShadowPolicy;
    pub use crate::{Color, Point, Ray, Vec3};
}

/// The ray in ray tracing
///
/// Never mutated after construction; primary, shadow, and reflected
/// casts each build a fresh one.
#[derive(Debug, Clone)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    pub fn get(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }
}

/// Errors raised while assembling a scene from configuration
///
/// Degenerate geometry and out-of-range coefficients are rejected here,
/// at build time, so tracing never has to produce NaNs from them.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid material `{name}`: {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("object references unknown material `{0}`")]
    UnknownMaterial(String),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),
}
