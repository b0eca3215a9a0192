//! Cameras and configs for cameras
use serde::{Deserialize, Serialize};

use crate::utils::SerdeVector;
use crate::{Point, Ray, SceneError, Vec3};

/// Camera Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub eye: SerdeVector,
    pub fov_deg: f64,
    pub width: u32,
    pub height: u32,
}

/// Pinhole camera looking down −z
///
/// Maps pixel coordinates to primary ray directions under a horizontal
/// field-of-view projection. Row 0 is the top of the image, so the
/// vertical axis flips. No state changes between pixels.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Point,
    width: u32,
    height: u32,
    // tan(fov / 2), fixed at construction
    half_fov: f64,
}
impl Camera {
    pub fn new(eye: Point, fov_deg: f64, width: u32, height: u32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "resolution must be nonzero, got {width}x{height}"
            )));
        }
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "field of view must be inside (0, 180) degrees, got {fov_deg}"
            )));
        }
        Ok(Self {
            eye,
            width,
            height,
            half_fov: (fov_deg.to_radians() / 2.0).tan(),
        })
    }

    pub fn from_config(config: &CameraConfig) -> Result<Self, SceneError> {
        Self::new(
            config.eye.into(),
            config.fov_deg,
            config.width,
            config.height,
        )
    }

    pub fn eye(&self) -> Point {
        self.eye
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Primary ray through the center of pixel (x, y)
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let w = self.width as f64;
        let h = self.height as f64;
        let aspect_ratio = w / h;

        let px = (2.0 * (x as f64 + 0.5) / w - 1.0) * aspect_ratio * self.half_fov;
        let py = (1.0 - 2.0 * (y as f64 + 0.5) / h) * self.half_fov;

        Ray::new(self.eye, Vec3::new(px, py, -1.0).normalize())
    }
}
