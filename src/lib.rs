//! pathlight path tracer
//!
//! Renders scenes of analytic spheres with Lambertian, metal, dielectric and
//! emissive materials using multi-sample recursive path tracing on the CPU.
//! Rows render in parallel; output is PPM or PNG.

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod error;
pub mod framebuffer;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod progress;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod vec;

pub use error::{Error, Result};
