//! Pinhole camera mapping image-plane coordinates to world-space rays.

use log::warn;

use crate::ray::Ray;
use crate::vec::{Point3, Vec3};

/// Below this length the camera's right vector has no usable direction.
const MIN_BASIS_LENGTH: f32 = 1e-6;

/// Pinhole camera.
///
/// All viewport geometry is computed once at construction; the camera is
/// immutable afterwards and only maps (u, v) coordinates to rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    origin: Point3,
    /// World position of the bottom-left corner of the viewport
    lower_left_corner: Point3,
    /// Vector spanning the full viewport width
    horizontal: Vec3,
    /// Vector spanning the full viewport height
    vertical: Vec3,
}

impl Camera {
    /// Camera at the origin looking down -z.
    ///
    /// Viewport is 2 units tall, `2 * aspect_ratio` units wide, 1 unit in front
    /// of the camera.
    pub fn new(aspect_ratio: f32) -> Self {
        let viewport_height = 2.0;
        let viewport_width = aspect_ratio * viewport_height;
        let focal = Vec3::new(0.0, 0.0, 1.0);

        let origin = Point3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);

        Self {
            origin,
            lower_left_corner: origin - horizontal / 2.0 - vertical / 2.0 - focal,
            horizontal,
            vertical,
        }
    }

    /// Camera placed at `lookfrom` aimed at `lookat`.
    ///
    /// `vfov` is the vertical field of view in degrees; `vup` orients the image
    /// so that it appears upright.
    ///
    /// If `vup` is parallel to the view direction the image has no horizontal
    /// extent; this is logged as a warning and every ray is the same.
    pub fn look_at(
        lookfrom: Point3,
        lookat: Point3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal camera basis
        let w = (lookfrom - lookat).normalize(); // opposite view direction
        let right = vup.cross(w);
        if has_collapsed(right) {
            warn!(
                "View up {:?} is parallel to the view direction {:?}; camera basis is degenerate",
                vup, -w
            );
        }
        let u = right.normalize(); // camera right
        let v = w.cross(u); // camera up

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;

        Self {
            origin: lookfrom,
            lower_left_corner: lookfrom - horizontal / 2.0 - vertical / 2.0 - w,
            horizontal,
            vertical,
        }
    }

    /// Ray from the camera through the viewport point at (u, v).
    ///
    /// (0, 0) is the bottom-left corner and (1, 1) the top-right one.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction =
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin;
        Ray::new(self.origin, direction)
    }
}

fn has_collapsed(right: Vec3) -> bool {
    right.length() < MIN_BASIS_LENGTH
}
