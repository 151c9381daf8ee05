//! Built-in scenes.
//!
//! Each preset bundles a list of spheres with the camera and integrator
//! policies it is meant to be viewed with.

use std::sync::Arc;

use log::debug;

use crate::camera::Camera;
use crate::hittable::HittableList;
use crate::material::Material;
use crate::random;
use crate::render::{Background, ShadingMode};
use crate::sphere::Sphere;
use crate::vec::{Colour, Point3, Vec3};

/// Random stream reserved for scene generation; rows use 0..height.
const SCENE_STREAM: u64 = u64::MAX;

/// Everything the renderer needs besides image settings.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
    pub background: Background,
    pub shading: ShadingMode,
}

/// Selectable built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    /// Two spheres viewed as surface normals over a sky.
    Normals,
    /// Diffuse sphere resting on a large diffuse ground sphere, under a sky.
    Diffuse,
    /// Diffuse, hollow glass and metal spheres side by side, under a sky.
    Materials,
    /// Diffuse spheres lit only by an emissive sphere.
    Lights,
    /// Field of small random spheres around three large ones.
    Cover,
}

impl ScenePreset {
    /// Build the scene for an image of the given aspect ratio.
    ///
    /// `seed` only matters for presets with randomly placed objects.
    pub fn build(self, aspect_ratio: f32, seed: u64) -> Scene {
        let scene = match self {
            ScenePreset::Normals => Scene {
                world: ground_and_sphere(Colour::splat(0.5), Colour::splat(0.5)),
                camera: Camera::new(aspect_ratio),
                background: Background::Sky,
                shading: ShadingMode::Normals,
            },
            ScenePreset::Diffuse => Scene {
                world: ground_and_sphere(Colour::splat(0.5), Colour::new(0.7, 0.3, 0.3)),
                camera: Camera::new(aspect_ratio),
                background: Background::Sky,
                shading: ShadingMode::Radiance,
            },
            ScenePreset::Materials => Scene {
                world: materials(),
                camera: Camera::new(aspect_ratio),
                background: Background::Sky,
                shading: ShadingMode::Radiance,
            },
            ScenePreset::Lights => Scene {
                world: lights(),
                camera: Camera::new(aspect_ratio),
                background: Background::Black,
                shading: ShadingMode::Radiance,
            },
            ScenePreset::Cover => Scene {
                world: cover(seed),
                camera: Camera::look_at(
                    Point3::new(13.0, 2.0, 3.0),
                    Point3::ZERO,
                    Vec3::new(0.0, 1.0, 0.0),
                    20.0,
                    aspect_ratio,
                ),
                background: Background::Sky,
                shading: ShadingMode::Radiance,
            },
        };
        debug!("Built {:?} scene with {} objects", self, scene.world.len());
        scene
    }
}

fn sphere(center: Point3, radius: f32, material: &Arc<Material>) -> Box<Sphere> {
    Box::new(Sphere::new(center, radius, Arc::clone(material)))
}

fn ground_and_sphere(ground: Colour, centre: Colour) -> HittableList {
    let mut world = HittableList::new();
    let ground = Arc::new(Material::lambertian(ground));
    let centre = Arc::new(Material::lambertian(centre));
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &centre));
    world
}

fn materials() -> HittableList {
    let ground = Arc::new(Material::lambertian(Colour::new(0.8, 0.8, 0.0)));
    let centre = Arc::new(Material::lambertian(Colour::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let metal = Arc::new(Material::metal(Colour::new(0.8, 0.6, 0.2), 0.0));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &centre));
    // negative inner radius turns the glass ball into a thin shell
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, &glass));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), -0.4, &glass));
    world.add(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, &metal));
    world
}

fn lights() -> HittableList {
    let ground = Arc::new(Material::lambertian(Colour::splat(0.5)));
    let centre = Arc::new(Material::lambertian(Colour::new(0.7, 0.3, 0.3)));
    let metal = Arc::new(Material::metal(Colour::new(0.8, 0.8, 0.8), 0.3));
    let lamp = Arc::new(Material::light(Colour::splat(4.0)));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &centre));
    world.add(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, &metal));
    world.add(sphere(Point3::new(-1.0, 0.6, -1.0), 0.3, &lamp));
    world
}

fn cover(seed: u64) -> HittableList {
    let mut rng = random::stream_rng(seed, SCENE_STREAM);
    let mut world = HittableList::new();

    let ground = Arc::new(Material::lambertian(Colour::splat(0.5)));
    world.add(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &ground));

    // Small spheres share one glass material; the others get their own colour
    let glass = Arc::new(Material::dielectric(1.5));
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(&mut rng);
            let center = Point3::new(
                a as f32 + 0.9 * random::random_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(&mut rng),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random::random_colour(&mut rng) * random::random_colour(&mut rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random::random_colour_range(&mut rng, 0.5, 1.0);
                let fuzz = random::random_f32_range(&mut rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };
            world.add(sphere(center, 0.2, &material));
        }
    }

    let brown = Arc::new(Material::lambertian(Colour::new(0.4, 0.2, 0.1)));
    let bronze = Arc::new(Material::metal(Colour::new(0.7, 0.6, 0.5), 0.0));
    world.add(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, &glass));
    world.add(sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, &brown));
    world.add(sphere(Point3::new(4.0, 1.0, 0.0), 1.0, &bronze));

    world
}
