//! Error types for rendering and output.

use std::io;

use thiserror::Error;

/// Errors surfaced by the renderer and its output stage.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported output format '{0}', expected .ppm or .png")]
    UnsupportedFormat(String),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
