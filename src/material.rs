//! Material system for path tracing.
//!
//! Four material kinds: Lambertian (diffuse), Metal (specular), Dielectric
//! (transparent) and Light (emissive). Materials are immutable and shared
//! between surfaces through `Arc<Material>`.

use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::vec::{Colour, Vec3};

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Colour factor applied to light arriving along `scattered`.
    pub attenuation: Colour,
    /// Continuation ray leaving the surface.
    pub scattered: Ray,
}

/// Surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Colour,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Colour,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },

    /// Emissive surface. Absorbs everything that hits it.
    Light {
        /// Radiance emitted by the surface.
        emission: Colour,
    },
}

impl Material {
    pub fn lambertian(albedo: Colour) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with `fuzz` clamped to [0, 1].
    pub fn metal(albedo: Colour, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    pub fn light(emission: Colour) -> Self {
        Material::Light { emission }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        r_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut R,
    ) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, r_in, rec, rng))
            }
            Material::Light { .. } => None,
        }
    }

    /// Light emitted by the surface itself; black unless this is a `Light`.
    pub fn emitted(&self) -> Colour {
        match *self {
            Material::Light { emission } => emission,
            _ => Colour::ZERO,
        }
    }
}

/// Lambertian diffuse scattering with cosine-weighted distribution.
fn scatter_lambertian<R: Rng + ?Sized>(
    albedo: Colour,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> Scatter {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // Catch degenerate scatter direction
    if scatter_direction.near_zero() {
        scatter_direction = rec.normal;
    }

    Scatter {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    }
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal<R: Rng + ?Sized>(
    albedo: Colour,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> Option<Scatter> {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let scattered = Ray::new(rec.p, reflected + fuzz * random::random_unit_vector(rng));

    (scattered.direction.dot(rec.normal) > 0.0).then_some(Scatter {
        attenuation: albedo,
        scattered,
    })
}

/// Dielectric scattering, choosing reflection or refraction per Schlick.
fn scatter_dielectric<R: Rng + ?Sized>(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> Scatter {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f32(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Scatter {
        attenuation: Colour::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface using Snell's law.
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
pub fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::stream_rng;
    use crate::vec::Point3;

    fn record(material: &Material, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Point3::ZERO,
            normal: Vec3::new(0.0, 1.0, 0.0),
            t: 1.0,
            front_face,
            material,
        }
    }

    #[test]
    fn metal_fuzz_is_clamped() {
        assert_eq!(
            Material::metal(Colour::ONE, 3.0),
            Material::Metal { albedo: Colour::ONE, fuzz: 1.0 }
        );
        assert_eq!(
            Material::metal(Colour::ONE, -0.5),
            Material::Metal { albedo: Colour::ONE, fuzz: 0.0 }
        );
    }

    #[test]
    fn lambertian_always_scatters_with_albedo() {
        let albedo = Colour::new(0.5, 0.4, 0.3);
        let mat = Material::lambertian(albedo);
        let rec = record(&mat, true);
        let r_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rng = stream_rng(11, 0);
        for _ in 0..500 {
            let s = mat.scatter(&r_in, &rec, &mut rng).expect("lambertian scatters");
            assert_eq!(s.attenuation, albedo);
            assert!(!s.scattered.direction.near_zero());
        }
    }

    #[test]
    fn averaged_attenuation_stays_within_albedo() {
        let albedo = Colour::new(0.5, 0.5, 0.5);
        let r_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = stream_rng(12, 0);
        for mat in [Material::lambertian(albedo), Material::metal(albedo, 0.8)] {
            let rec = record(&mat, true);
            let n = 2000;
            let mut sum = Colour::ZERO;
            for _ in 0..n {
                if let Some(s) = mat.scatter(&r_in, &rec, &mut rng) {
                    sum += s.attenuation;
                }
            }
            let mean = sum / n as f32;
            assert!(mean.r() <= albedo.r() + 1e-4);
            assert!(mean.g() <= albedo.g() + 1e-4);
            assert!(mean.b() <= albedo.b() + 1e-4);
        }
    }

    #[test]
    fn mirror_metal_reflects_about_normal() {
        let mat = Material::metal(Colour::ONE, 0.0);
        let rec = record(&mat, true);
        let r_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let s = mat
            .scatter(&r_in, &rec, &mut stream_rng(0, 0))
            .expect("mirror reflection leaves the surface");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((s.scattered.direction - expected).length() < 1e-5);
    }

    #[test]
    fn metal_absorbs_rays_scattered_below_surface() {
        let mat = Material::metal(Colour::ONE, 0.0);
        let rec = record(&mat, true);
        // grazing from below the tangent plane reflects into the surface
        let r_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        assert!(mat.scatter(&r_in, &rec, &mut stream_rng(0, 0)).is_none());
    }

    #[test]
    fn light_emits_and_never_scatters() {
        let emission = Colour::new(4.0, 4.0, 4.0);
        let mat = Material::light(emission);
        let rec = record(&mat, true);
        let r_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(mat.scatter(&r_in, &rec, &mut stream_rng(0, 0)).is_none());
        assert_eq!(mat.emitted(), emission);
        assert_eq!(Material::lambertian(Colour::ONE).emitted(), Colour::ZERO);
    }

    #[test]
    fn normal_incidence_reflectance_is_r0() {
        let ior = 1.5_f32;
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        assert!((reflectance(1.0, ior) - r0).abs() < 1e-6);
        assert!(reflectance(1.0, 1.0 / ior) < 0.5);
    }

    #[test]
    fn dielectric_at_normal_incidence_never_totally_reflects() {
        let mat = Material::dielectric(1.5);
        let r_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rng = stream_rng(13, 0);
        for front_face in [true, false] {
            let rec = record(&mat, front_face);
            let n = 2000;
            let mut reflected = 0;
            for _ in 0..n {
                let s = mat.scatter(&r_in, &rec, &mut rng).expect("dielectric never absorbs");
                assert_eq!(s.attenuation, Colour::ONE);
                if s.scattered.direction.y() > 0.0 {
                    reflected += 1;
                }
            }
            // r0 is 0.04; anything near 1 would mean total internal reflection
            assert!(reflected < n / 5, "reflected {reflected} of {n}");
        }
    }

    #[test]
    fn refract_at_normal_incidence_goes_straight_through() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let out = refract(Vec3::new(0.0, -1.0, 0.0), n, 1.0 / 1.5);
        assert!((out - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn grazing_exit_totally_reflects() {
        let mat = Material::dielectric(1.5);
        // inside the medium, leaving at a shallow angle
        let rec = record(&mat, false);
        let r_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.1, 0.0));
        let mut rng = stream_rng(14, 0);
        let rec = HitRecord {
            normal: Vec3::new(0.0, -1.0, 0.0),
            ..rec
        };
        for _ in 0..100 {
            let s = mat.scatter(&r_in, &rec, &mut rng).expect("dielectric never absorbs");
            assert!(s.scattered.direction.y() < 0.0);
        }
    }
}
