//! Render loop and light-transport integrator.
//!
//! Rows are rendered in parallel with rayon. Every row owns its output slice
//! and its own random stream, so the result is a pure function of the scene,
//! the settings and the seed.

use std::time::Instant;

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::framebuffer::Image;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::progress::RowProgress;
use crate::random;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vec::Colour;

/// Smallest accepted hit distance; keeps scattered rays off their own surface.
pub const T_MIN: f32 = 0.001;

/// Colour returned for rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// No ambient light; only emissive surfaces light the scene.
    Black,
    /// Vertical white to light-blue gradient.
    Sky,
}

impl Background {
    pub fn colour(&self, r: &Ray) -> Colour {
        match self {
            Background::Black => Colour::ZERO,
            Background::Sky => {
                let unit_direction = r.direction.normalize();
                let a = 0.5 * (unit_direction.y() + 1.0);
                Colour::ONE.lerp(Colour::new(0.5, 0.7, 1.0), a)
            }
        }
    }
}

/// What a camera ray evaluates to when it hits a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// Recursive scatter/emit light transport.
    Radiance,
    /// Debug view mapping the surface normal to a colour.
    Normals,
}

/// Image size and sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per camera ray.
    pub max_depth: u32,
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

impl RenderSettings {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidSettings(format!(
                "image must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(Error::InvalidSettings(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Evaluates the colour carried back along a ray.
pub struct Integrator<'a> {
    world: &'a dyn Hittable,
    background: Background,
    shading: ShadingMode,
    max_depth: u32,
}

impl<'a> Integrator<'a> {
    pub fn new(
        world: &'a dyn Hittable,
        background: Background,
        shading: ShadingMode,
        max_depth: u32,
    ) -> Self {
        Self {
            world,
            background,
            shading,
            max_depth,
        }
    }

    /// Colour of one camera ray under the configured shading mode.
    pub fn sample<R: Rng + ?Sized>(&self, r: &Ray, rng: &mut R) -> Colour {
        match self.shading {
            ShadingMode::Radiance => self.radiance(r, self.max_depth, rng),
            ShadingMode::Normals => self.normal_colour(r),
        }
    }

    /// Recursive light transport, bounded by `depth` bounces.
    pub fn radiance<R: Rng + ?Sized>(&self, r: &Ray, depth: u32, rng: &mut R) -> Colour {
        if depth == 0 {
            return Colour::ZERO;
        }

        let Some(rec) = self.world.hit(r, Interval::new(T_MIN, f32::INFINITY)) else {
            return self.background.colour(r);
        };

        let emitted = rec.material.emitted();
        match rec.material.scatter(r, &rec, rng) {
            Some(scatter) => {
                emitted + scatter.attenuation * self.radiance(&scatter.scattered, depth - 1, rng)
            }
            None => emitted,
        }
    }

    /// Surface normal mapped from [-1, 1] to [0, 1] per channel.
    pub fn normal_colour(&self, r: &Ray) -> Colour {
        match self.world.hit(r, Interval::new(T_MIN, f32::INFINITY)) {
            Some(rec) => 0.5 * (rec.normal.to_colour() + Colour::ONE),
            None => self.background.colour(r),
        }
    }
}

/// Render `scene` into a new image.
///
/// Each pixel averages `samples_per_pixel` jittered samples and is stored
/// gamma-2 corrected.
pub fn render(scene: &Scene, settings: &RenderSettings, progress: &RowProgress) -> Result<Image> {
    settings.validate()?;

    let mut image = Image::new(settings.width, settings.height);
    let integrator = Integrator::new(
        &scene.world,
        scene.background,
        scene.shading,
        settings.max_depth,
    );

    let height = settings.height;
    let u_span = settings.width.saturating_sub(1).max(1) as f32;
    let v_span = height.saturating_sub(1).max(1) as f32;

    info!(
        "Rendering {}x{} at {} spp using {} threads...",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        rayon::current_num_threads()
    );
    debug!("Render settings: {:?}", settings);
    let start = Instant::now();

    image.par_rows_mut().for_each(|(y, row)| {
        let mut rng = random::stream_rng(settings.seed, y as u64);
        // image rows run top-down, the viewport's v runs bottom-up
        let j = (height - 1 - y) as f32;

        for (i, pixel) in row.iter_mut().enumerate() {
            for _ in 0..settings.samples_per_pixel {
                let u = (i as f32 + random::random_f32_range(&mut rng, -0.5, 0.5)) / u_span;
                let v = (j + random::random_f32_range(&mut rng, -0.5, 0.5)) / v_span;
                let r = scene.camera.get_ray(u, v);
                *pixel += integrator.sample(&r, &mut rng);
            }
        }

        progress.row_completed();
    });

    progress.finish();

    // Box filter, then gamma
    image.scale_brightness(1.0 / settings.samples_per_pixel as f32);
    image.gamma_correct();
    info!("Image generated in {:.2?}", start.elapsed());

    Ok(image)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::camera::Camera;
    use crate::hittable::HittableList;
    use crate::material::Material;
    use crate::random::stream_rng;
    use crate::sphere::Sphere;
    use crate::vec::{Point3, Vec3};

    fn single_sphere(material: Material) -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, Arc::new(material))));
        world
    }

    fn towards_sphere() -> Ray {
        Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn sky_gradient_endpoints() {
        let up = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let down = Ray::new(Point3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let top = Background::Sky.colour(&up) - Colour::new(0.5, 0.7, 1.0);
        assert!(top.to_vec3().length() < 1e-6);
        assert_eq!(Background::Sky.colour(&down), Colour::ONE);
        assert_eq!(Background::Black.colour(&up), Colour::ZERO);
    }

    #[test]
    fn zero_depth_is_black() {
        let world = single_sphere(Material::light(Colour::ONE));
        let integrator = Integrator::new(&world, Background::Sky, ShadingMode::Radiance, 0);
        let c = integrator.radiance(&towards_sphere(), 0, &mut stream_rng(0, 0));
        assert_eq!(c, Colour::ZERO);
    }

    #[test]
    fn miss_returns_background() {
        let world = HittableList::new();
        let r = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let sky = Integrator::new(&world, Background::Sky, ShadingMode::Radiance, 5);
        let black = Integrator::new(&world, Background::Black, ShadingMode::Radiance, 5);
        let mut rng = stream_rng(0, 0);
        assert_eq!(sky.sample(&r, &mut rng), Background::Sky.colour(&r));
        assert_eq!(black.sample(&r, &mut rng), Colour::ZERO);
    }

    #[test]
    fn light_returns_its_emission() {
        let emission = Colour::new(2.0, 1.0, 0.5);
        let world = single_sphere(Material::light(emission));
        let integrator = Integrator::new(&world, Background::Sky, ShadingMode::Radiance, 3);
        assert_eq!(integrator.sample(&towards_sphere(), &mut stream_rng(0, 0)), emission);
    }

    #[test]
    fn diffuse_in_the_dark_stays_black() {
        let world = single_sphere(Material::lambertian(Colour::splat(0.8)));
        let integrator = Integrator::new(&world, Background::Black, ShadingMode::Radiance, 10);
        let mut rng = stream_rng(3, 0);
        for _ in 0..50 {
            assert_eq!(integrator.sample(&towards_sphere(), &mut rng), Colour::ZERO);
        }
    }

    #[test]
    fn diffuse_under_sky_is_bounded_by_albedo() {
        let albedo = Colour::new(0.7, 0.3, 0.3);
        let world = single_sphere(Material::lambertian(albedo));
        let integrator = Integrator::new(&world, Background::Sky, ShadingMode::Radiance, 10);
        let mut rng = stream_rng(4, 0);
        for _ in 0..200 {
            let c = integrator.sample(&towards_sphere(), &mut rng);
            assert!(c.r() <= albedo.r() + 1e-5);
            assert!(c.g() <= albedo.g() + 1e-5);
            assert!(c.b() <= albedo.b() + 1e-5);
        }
    }

    #[test]
    fn normal_mode_maps_facing_normal() {
        let world = single_sphere(Material::lambertian(Colour::ONE));
        let integrator = Integrator::new(&world, Background::Sky, ShadingMode::Normals, 1);
        let c = integrator.sample(&towards_sphere(), &mut stream_rng(0, 0));
        assert!((c.to_vec3() - Vec3::new(0.5, 0.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let scene = Scene {
            world: HittableList::new(),
            camera: Camera::new(1.0),
            background: Background::Sky,
            shading: ShadingMode::Radiance,
        };
        for settings in [
            RenderSettings { width: 0, ..RenderSettings::default() },
            RenderSettings { height: 0, ..RenderSettings::default() },
            RenderSettings { samples_per_pixel: 0, ..RenderSettings::default() },
        ] {
            let result = render(&scene, &settings, &RowProgress::hidden(settings.height));
            assert!(matches!(result, Err(Error::InvalidSettings(_))));
        }
    }

    #[test]
    fn single_pixel_image_renders() {
        let scene = Scene {
            world: HittableList::new(),
            camera: Camera::new(1.0),
            background: Background::Sky,
            shading: ShadingMode::Radiance,
        };
        let settings = RenderSettings {
            width: 1,
            height: 1,
            samples_per_pixel: 4,
            max_depth: 4,
            seed: 9,
        };
        let progress = RowProgress::hidden(1);
        let image = render(&scene, &settings, &progress).expect("valid settings");
        assert_eq!((image.width(), image.height()), (1, 1));
        assert_eq!(progress.completed(), 1);
        assert!(image.at(0, 0).b() > 0.0);
    }
}
