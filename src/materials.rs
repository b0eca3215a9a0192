//! Implementation of materials

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{utils::SerdeVector, Color, SceneError};

/// Materials are immutable after scene setup and shared by any number
/// of objects.
pub type SharedMaterial = Arc<Material>;

/// Surface appearance: a base color plus Phong coefficients
///
/// `ambient + diffuse` need not sum to one; the traced color is clamped
/// at the end, not normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color, each channel in [0, 1]
    pub color: Color,
    /// Ambient coefficient in [0, 1]
    pub ambient: f64,
    /// Diffuse coefficient in [0, 1]
    pub diffuse: f64,
    /// Specular coefficient in [0, 1]
    pub specular: f64,
    /// Specular exponent, any positive value
    pub shininess: f64,
    /// Blend weight between local shading and the mirror reflection
    pub reflection: f64,
}

impl Material {
    /// A material with the stock coefficient set, varying only in color
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.2,
            shininess: 50.0,
            reflection: 0.5,
        }
    }

    pub fn from_config(name: &str, config: &MaterialConfig) -> Result<Self, SceneError> {
        let material = Self {
            color: config.color.into(),
            ambient: config.ambient,
            diffuse: config.diffuse,
            specular: config.specular,
            shininess: config.shininess,
            reflection: config.reflection,
        };
        if let Err(reason) = material.check() {
            return Err(SceneError::InvalidMaterial {
                name: name.to_owned(),
                reason,
            });
        }
        Ok(material)
    }

    fn check(&self) -> Result<(), String> {
        for (label, value) in [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("reflection", self.reflection),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{label} must be within [0, 1], got {value}"));
            }
        }
        if !(self.shininess > 0.0) {
            return Err(format!(
                "shininess must be positive, got {}",
                self.shininess
            ));
        }
        for c in 0..3 {
            if !(0.0..=1.0).contains(&self.color[c]) {
                return Err(format!(
                    "color channels must be within [0, 1], got {}",
                    self.color[c]
                ));
            }
        }
        Ok(())
    }
}

/// Material Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub color: SerdeVector,
    #[serde(default = "defaults::ambient")]
    pub ambient: f64,
    #[serde(default = "defaults::diffuse")]
    pub diffuse: f64,
    #[serde(default = "defaults::specular")]
    pub specular: f64,
    #[serde(default = "defaults::shininess")]
    pub shininess: f64,
    #[serde(default = "defaults::reflection")]
    pub reflection: f64,
}

mod defaults {
    pub fn ambient() -> f64 {
        0.1
    }
    pub fn diffuse() -> f64 {
        0.7
    }
    pub fn specular() -> f64 {
        0.2
    }
    pub fn shininess() -> f64 {
        50.0
    }
    pub fn reflection() -> f64 {
        0.5
    }
}
