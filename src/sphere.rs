//! Sphere primitive for path tracing.
//!
//! Ray-sphere intersection using the half-b form of the quadratic formula.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec::Point3;

/// Radii below this magnitude describe a point, which has no surface.
const MIN_RADIUS: f32 = 1e-8;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Point3,

    /// Radius of the sphere.
    ///
    /// A negative radius keeps the same surface but flips the outward normal,
    /// which turns the sphere into a hollow shell when nested inside another.
    pub radius: f32,

    /// Material shared with every other surface that uses it.
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // the outward normal divides by the radius
        if self.radius.abs() < MIN_RADIUS {
            return None;
        }

        let oc = r.origin - self.center;

        let a = r.direction.length_squared();
        let half_b = oc.dot(r.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (r.at(root) - self.center) / self.radius;
        Some(HitRecord::new(r, root, outward_normal, &self.material))
    }
}
