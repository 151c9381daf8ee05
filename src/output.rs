//! # Output Module
//!
//! Writes a rendered [`Image`] to its destination:
//! - plain-text PPM (P3) to a file or to stdout
//! - 8-bit PNG through the `image` crate
//!
//! Both formats share the same quantisation, so a PPM and a PNG of one render
//! contain identical pixel values.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::framebuffer::Image;

/// Destination name meaning "write PPM to stdout".
pub const STDOUT: &str = "-";

/// File formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ppm,
    Png,
}

impl OutputFormat {
    /// Pick the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ppm" => Ok(OutputFormat::Ppm),
            "png" => Ok(OutputFormat::Png),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Write `image` to `destination`, a file path or [`STDOUT`].
pub fn write_image(image: &Image, destination: &str) -> Result<()> {
    if destination == STDOUT {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        image.write_ppm(&mut out)?;
        out.flush()?;
        debug!("Image written to stdout as PPM");
        return Ok(());
    }

    let path = Path::new(destination);
    match OutputFormat::from_path(path)? {
        OutputFormat::Ppm => save_image_as_ppm(image, path),
        OutputFormat::Png => save_image_as_png(image, path),
    }
}

/// Save as plain-text PPM.
pub fn save_image_as_ppm(image: &Image, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    image.write_ppm(&mut out)?;
    out.flush()?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save as 8-bit PNG.
pub fn save_image_as_png(image: &Image, path: &Path) -> Result<()> {
    image.to_rgb8().save(path)?;
    info!("Image saved as {}", path.display());
    Ok(())
}
