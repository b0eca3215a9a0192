//! Objects

use serde::{Deserialize, Serialize};

use crate::{
    materials::SharedMaterial,
    utils::{safe_normalize, SerdeVector},
    Point, Ray, SceneError, Vec3, PARALLEL_EPS, T_MIN,
};

pub type SceneObject = Box<dyn Intersectable + Send + Sync>;

/// Something a ray can hit
///
/// The variant set is closed (sphere, plane); each implementation
/// answers the intersection and surface-normal queries for one shape.
pub trait Intersectable {
    /// Distance along the ray to the nearest intersection past `T_MIN`
    fn try_intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward unit normal at a point on the surface
    fn normal_at(&self, point: &Point) -> Vec3;

    fn material(&self) -> &SharedMaterial;
}

/// Build a boxed object from its config and resolved material
pub fn from_config(config: &ObjectConfig, material: SharedMaterial) -> Result<SceneObject, SceneError> {
    Ok(match config {
        ObjectConfig::Sphere(c) => Box::new(Sphere::new(c.center.into(), c.radius, material)?),
        ObjectConfig::Plane(c) => Box::new(Plane::new(c.point.into(), c.normal.into(), material)?),
    })
}

/// Object Config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectConfig {
    Sphere(SphereConfig),
    Plane(PlaneConfig),
}
impl ObjectConfig {
    /// Name of the material this object references
    pub fn material_name(&self) -> &str {
        match self {
            ObjectConfig::Sphere(c) => &c.material,
            ObjectConfig::Plane(c) => &c.material,
        }
    }
}

/// Sphere config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    pub center: SerdeVector,
    pub radius: f64,
    pub material: String,
}

/// Plane config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneConfig {
    pub point: SerdeVector,
    pub normal: SerdeVector,
    pub material: String,
}

pub struct Sphere {
    pub center: Point,
    pub radius: f64,
    pub material: SharedMaterial,
}
impl Sphere {
    pub fn new(center: Point, radius: f64, material: SharedMaterial) -> Result<Self, SceneError> {
        if radius <= 0.0 {
            return Err(SceneError::InvalidGeometry(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }
}
impl Intersectable for Sphere {
    fn try_intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.orig - self.center;
        let a = ray.dir.dot(&ray.dir);
        let b = 2.0 * oc.dot(&ray.dir);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Take the near root when it clears T_MIN; fall back to the far
        // root so a ray starting inside the sphere still hits the shell
        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        if near > T_MIN {
            return Some(near);
        }
        let far = (-b + sqrtd) / (2.0 * a);
        if far > T_MIN {
            return Some(far);
        }
        None
    }

    fn normal_at(&self, point: &Point) -> Vec3 {
        safe_normalize(&(point - self.center))
    }

    fn material(&self) -> &SharedMaterial {
        &self.material
    }
}

pub struct Plane {
    pub point: Point,
    /// Stored unit length; `new` normalizes whatever it is given
    pub normal: Vec3,
    pub material: SharedMaterial,
}
impl Plane {
    pub fn new(point: Point, normal: Vec3, material: SharedMaterial) -> Result<Self, SceneError> {
        if normal.norm() == 0.0 {
            return Err(SceneError::InvalidGeometry(
                "plane normal must be nonzero".to_owned(),
            ));
        }
        Ok(Self {
            point,
            normal: normal.normalize(),
            material,
        })
    }
}
impl Intersectable for Plane {
    fn try_intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = ray.dir.dot(&self.normal);
        if denom.abs() < PARALLEL_EPS {
            return None;
        }
        let t = (self.point - ray.orig).dot(&self.normal) / denom;
        (t > T_MIN).then_some(t)
    }

    fn normal_at(&self, _point: &Point) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &SharedMaterial {
        &self.material
    }
}
