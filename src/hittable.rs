//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives and HitRecord for
//! storing intersection data.

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec::{Point3, Vec3};

/// Ray-object intersection information.
///
/// Borrows the material of the surface that was hit, so it cannot outlive the
/// scene it came from.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Point3,
    /// Surface normal at the intersection point (unit vector, against the ray)
    pub normal: Vec3,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the outward normal, orienting it against the ray.
    pub fn new(r: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: r.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set surface normal and determine front/back face.
    ///
    /// Ensures normal always points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) since rows render in parallel against a
/// shared scene.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the nearest hit with `t` inside `ray_t`, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let window = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(r, window) {
                closest = Some(rec);
            }
        }

        closest
    }
}
