//! Recursive tracing with reflection blending

use crate::{
    render::RenderSettings,
    scene::Scene,
    shading::illuminate,
    utils::{clamp_color, reflect, safe_normalize},
    Color, Ray, NUDGE,
};

/// Traces rays through one immutable scene
///
/// Borrows the scene and settings for the duration of a render pass;
/// cheap to share across worker threads.
pub struct Tracer<'a> {
    scene: &'a Scene,
    settings: &'a RenderSettings,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, settings: &'a RenderSettings) -> Self {
        Self { scene, settings }
    }

    /// Color seen along a ray, `depth` reflections in
    ///
    /// Misses return the background color. Each hit is shaded locally,
    /// then blended with one recursively traced mirror bounce while the
    /// material reflects and `depth` is under the bound. The result is
    /// clamped to [0, 1] per channel.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let hit = match self.scene.closest_hit(ray) {
            Some(hit) => hit,
            None => return self.settings.background,
        };

        let object = self.scene.object(hit.index);
        let surface_point = ray.get(hit.t);
        let normal = object.normal_at(&surface_point);
        // Lift the point off the surface so secondary rays do not
        // immediately re-hit it
        let hit_point = surface_point + normal * NUDGE;

        let material = object.material();
        let mut color = illuminate(
            self.scene,
            &hit_point,
            &normal,
            material,
            ray,
            self.settings.shadow_policy,
        );

        if material.reflection > 0.0 && depth < self.settings.max_depth {
            let reflected_dir = safe_normalize(&reflect(&ray.dir, &normal));
            let reflected_ray = Ray::new(hit_point, reflected_dir);
            let reflected_color = self.trace(&reflected_ray, depth + 1);
            color = color * (1.0 - material.reflection) + reflected_color * material.reflection;
        }

        clamp_color(&color)
    }
}
