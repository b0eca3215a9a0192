//! Scene assembly and the closest-hit query

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cameras::CameraConfig,
    lights::{Light, LightConfig},
    materials::{Material, MaterialConfig},
    objects::{self, ObjectConfig, SceneObject},
    render::RenderSettingsConfig,
    Ray, SceneError,
};

/// An ordered collection of objects and lights
///
/// Built once before rendering and read-only afterwards. Objects keep
/// their insertion order, which fixes the tie-break in `closest_hit`.
#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("lights", &self.lights)
            .finish()
    }
}

/// The nearest intersection along a ray
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Index of the hit object in the scene's collection
    pub index: usize,
    /// Distance along the ray
    pub t: f64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn object(&self, index: usize) -> &SceneObject {
        &self.objects[index]
    }

    /// Linear scan for the nearest valid intersection
    ///
    /// Strict `<` keeps the first-scanned object on ties, so a given
    /// insertion order always produces the same answer.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        for (index, obj) in self.objects.iter().enumerate() {
            if let Some(t) = obj.try_intersect(ray) {
                if closest.map_or(true, |hit| t < hit.t) {
                    closest = Some(Hit { index, t });
                }
            }
        }
        closest
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let mut materials = HashMap::new();
        for (name, mat_config) in &config.materials {
            let material = Arc::new(Material::from_config(name, mat_config)?);
            materials.insert(name.as_str(), material);
        }

        let mut scene = Self::new();
        for obj_config in &config.objects {
            let name = obj_config.material_name();
            let material = materials
                .get(name)
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial(name.to_owned()))?;
            scene.add_object(objects::from_config(obj_config, material)?);
        }
        for light_config in &config.lights {
            scene.add_light(Light::from_config(light_config));
        }

        debug!(
            "scene built: {} objects, {} lights, {} materials",
            scene.objects.len(),
            scene.lights.len(),
            materials.len()
        );
        Ok(scene)
    }
}

/// Scene Config
///
/// The whole YAML scene file: a named material table, the objects that
/// reference it, lights, the camera, and optional render settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub materials: HashMap<String, MaterialConfig>,
    pub objects: Vec<ObjectConfig>,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    pub camera: CameraConfig,
    #[serde(default)]
    pub settings: RenderSettingsConfig,
}
