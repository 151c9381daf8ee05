//! Random number generation for path tracing.
//!
//! Every helper takes the generator explicitly. The renderer hands each image
//! row its own ChaCha20 stream derived from the render seed, so results depend
//! on the seed alone and not on how rows are scheduled across threads.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::vec::{Colour, Vec3};

/// Generator for one independent unit of work (an image row).
///
/// Same `seed` and `stream` always produce the same sequence.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Draw a fresh seed from the operating system generator.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate random unit vector uniformly distributed on unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // Generate uniform θ in [0, 2π)
    let theta = 2.0 * std::f32::consts::PI * random_f32(rng);

    // Generate uniform cos(φ) in [-1, 1] for proper sphere distribution
    let cos_phi = 2.0 * random_f32(rng) - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();

    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_colour<R: Rng + ?Sized>(rng: &mut R) -> Colour {
    Colour::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Generate random RGB color with components in [min, max).
pub fn random_colour_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Colour {
    Colour::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}
