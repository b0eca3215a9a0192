//! Local Phong illumination

use serde::{Deserialize, Serialize};

use crate::{materials::Material, scene::Scene, utils::safe_normalize, Color, Point, Ray, Vec3};

/// What an occluded light still contributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShadowPolicy {
    /// An occluded light contributes nothing at all
    HardCutoff,
    /// An occluded light keeps `factor` of its diffuse term; specular
    /// is dropped with the rest
    Dimmed { factor: f64 },
}

impl Default for ShadowPolicy {
    fn default() -> Self {
        Self::HardCutoff
    }
}

/// Evaluate ambient plus per-light diffuse and specular at a hit point
///
/// `hit_point` must already be nudged off the surface; shadow rays are
/// cast straight from it toward each light. A light is occluded when
/// the scene reports a hit closer than the light itself. The returned
/// color is the raw accumulation, not yet clamped.
pub fn illuminate(
    scene: &Scene,
    hit_point: &Point,
    normal: &Vec3,
    material: &Material,
    ray: &Ray,
    policy: ShadowPolicy,
) -> Color {
    let mut color = material.color * material.ambient;

    for light in scene.lights() {
        let to_light = safe_normalize(&(light.position - hit_point));
        let light_dist = (light.position - hit_point).norm();

        let shadow_ray = Ray::new(*hit_point, to_light);
        let occluded = scene
            .closest_hit(&shadow_ray)
            .map_or(false, |hit| hit.t < light_dist);

        let (diffuse_scale, keep_specular) = match (occluded, policy) {
            (false, _) => (1.0, true),
            (true, ShadowPolicy::HardCutoff) => continue,
            (true, ShadowPolicy::Dimmed { factor }) => (factor, false),
        };

        let lambert = normal.dot(&to_light).max(0.0);
        color += material.color.component_mul(&light.color)
            * (material.diffuse * lambert * diffuse_scale);

        if keep_specular {
            let reflected_light =
                safe_normalize(&(2.0 * normal.dot(&to_light) * normal - to_light));
            let to_camera = safe_normalize(&(ray.orig - hit_point));
            let spec = reflected_light
                .dot(&to_camera)
                .max(0.0)
                .powf(material.shininess);
            color += light.color * (material.specular * spec);
        }
    }

    color
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::lights::Light;
    use crate::objects::Sphere;

    fn lit_point_scene(occluder: bool) -> Scene {
        let mut scene = Scene::new();
        if occluder {
            let material = Arc::new(Material::new(Color::new(0.3, 0.3, 0.3)));
            scene.add_object(Box::new(
                Sphere::new(Point::new(0.0, 2.5, 0.0), 0.5, material).unwrap(),
            ));
        }
        scene.add_light(Light::new(
            Point::new(0.0, 5.0, 0.0),
            Color::new(1.0, 1.0, 1.0),
        ));
        scene
    }

    fn surface() -> (Point, Vec3, Material, Ray) {
        let hit_point = Point::zeros();
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let material = Material::new(Color::new(0.8, 0.2, 0.2));
        let ray = Ray::new(Point::new(0.0, 1.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        (hit_point, normal, material, ray)
    }

    #[test]
    fn unobstructed_light_adds_diffuse_on_the_lit_hemisphere() {
        let scene = lit_point_scene(false);
        let (hit_point, normal, material, ray) = surface();

        let ambient_only = material.color * material.ambient;
        let color = illuminate(
            &scene,
            &hit_point,
            &normal,
            &material,
            &ray,
            ShadowPolicy::HardCutoff,
        );

        assert!(color[0] > ambient_only[0]);
        assert!(color[1] > ambient_only[1]);
    }

    #[test]
    fn occluder_between_light_and_point_leaves_ambient_only() {
        let scene = lit_point_scene(true);
        let (hit_point, normal, material, ray) = surface();

        let color = illuminate(
            &scene,
            &hit_point,
            &normal,
            &material,
            &ray,
            ShadowPolicy::HardCutoff,
        );

        assert_eq!(color, material.color * material.ambient);
    }

    #[test]
    fn occluder_beyond_the_light_casts_no_shadow() {
        let mut scene = lit_point_scene(false);
        let material = Arc::new(Material::new(Color::new(0.3, 0.3, 0.3)));
        scene.add_object(Box::new(
            Sphere::new(Point::new(0.0, 10.0, 0.0), 0.5, material).unwrap(),
        ));
        let (hit_point, normal, material, ray) = surface();

        let color = illuminate(
            &scene,
            &hit_point,
            &normal,
            &material,
            &ray,
            ShadowPolicy::HardCutoff,
        );

        let ambient_only = material.color * material.ambient;
        assert!(color[0] > ambient_only[0]);
    }

    #[test]
    fn dimmed_policy_keeps_a_fraction_of_the_diffuse_term() {
        let (hit_point, normal, mut material, ray) = surface();
        // Isolate the diffuse term
        material.ambient = 0.0;
        material.specular = 0.0;

        let lit = illuminate(
            &lit_point_scene(false),
            &hit_point,
            &normal,
            &material,
            &ray,
            ShadowPolicy::Dimmed { factor: 0.2 },
        );
        let shadowed = illuminate(
            &lit_point_scene(true),
            &hit_point,
            &normal,
            &material,
            &ray,
            ShadowPolicy::Dimmed { factor: 0.2 },
        );

        assert!((shadowed[0] - 0.2 * lit[0]).abs() < 1e-9);
        assert!((shadowed[1] - 0.2 * lit[1]).abs() < 1e-9);
    }

    #[test]
    fn light_below_the_horizon_contributes_no_diffuse() {
        let mut scene = Scene::new();
        scene.add_light(Light::new(
            Point::new(0.0, -5.0, 0.0),
            Color::new(1.0, 1.0, 1.0),
        ));
        let (hit_point, normal, mut material, ray) = surface();
        material.specular = 0.0;

        let color = illuminate(
            &scene,
            &hit_point,
            &normal,
            &material,
            &ray,
            ShadowPolicy::HardCutoff,
        );

        assert_eq!(color, material.color * material.ambient);
    }
}
