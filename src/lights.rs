//! Point lights

use serde::{Deserialize, Serialize};

use crate::{utils::SerdeVector, Color, Point};

/// A point light source
///
/// Color doubles as intensity; channels above 1 model a brighter lamp.
#[derive(Debug, Clone)]
pub struct Light {
    pub position: Point,
    pub color: Color,
}
impl Light {
    pub fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }

    pub fn from_config(config: &LightConfig) -> Self {
        Self::new(config.position.into(), config.color.into())
    }
}

/// Light Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    pub position: SerdeVector,
    pub color: SerdeVector,
}
