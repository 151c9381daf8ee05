//! Frame buffer holding the rendered colour grid.
//!
//! Pixels are stored row-major with row 0 at the top of the picture. While a
//! render is in progress the values are linear and unbounded; quantisation to
//! 8 bits happens only when the image is serialized.

use std::io::{self, Write};

use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::interval::Interval;
use crate::vec::Colour;

/// Channel range that survives quantisation; 1.0 would map to 256.
const DISPLAY_RANGE: Interval = Interval {
    min: 0.0,
    max: 0.999,
};

/// Map a channel to `floor(256 * clamp(c, 0, 0.999))`.
pub fn quantize(channel: f32) -> u8 {
    (256.0 * DISPLAY_RANGE.clamp(channel)) as u8
}

/// Rows needed for an image `width` pixels wide at `aspect_ratio`.
///
/// Truncated, and never less than one row.
pub fn height_for_aspect(width: usize, aspect_ratio: f32) -> usize {
    ((width as f32 / aspect_ratio) as usize).max(1)
}

/// 2D grid of colours.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Colour>,
}

impl Image {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Colour::ZERO; width * height],
        }
    }

    /// Black image `width` pixels wide with height derived from `aspect_ratio`.
    pub fn with_aspect_ratio(width: usize, aspect_ratio: f32) -> Self {
        Self::new(width, height_for_aspect(width, aspect_ratio))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels in row-major order, top row first.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn at(&self, x: usize, y: usize) -> &Colour {
        &self.pixels[self.index(x, y)]
    }

    /// Mutable pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn at_mut(&mut self, x: usize, y: usize) -> &mut Colour {
        let i = self.index(x, y);
        &mut self.pixels[i]
    }

    /// Rows paired with their index, for parallel processing.
    ///
    /// Each row is a disjoint slice, so workers never share a pixel.
    pub fn par_rows_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (usize, &mut [Colour])> + '_ {
        self.pixels.par_chunks_mut(self.width.max(1)).enumerate()
    }

    /// Multiply every pixel by `sf`.
    pub fn scale_brightness(&mut self, sf: f32) {
        for pixel in &mut self.pixels {
            *pixel *= sf;
        }
    }

    /// Apply the gamma-2 transform to every pixel.
    pub fn gamma_correct(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = pixel.gamma2();
        }
    }

    /// Serialize as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for pixel in &self.pixels {
            writeln!(
                out,
                "{} {} {}",
                quantize(pixel.r()),
                quantize(pixel.g()),
                quantize(pixel.b())
            )?;
        }
        Ok(())
    }

    /// 8-bit RGB copy of the image using the same quantisation as PPM output.
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.at(x as usize, y as usize);
            Rgb([quantize(c.r()), quantize(c.g()), quantize(c.b())])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ppm(img: &Image) -> String {
        let mut buf = Vec::new();
        img.write_ppm(&mut buf).expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("PPM is ASCII")
    }

    #[test]
    fn quantize_clamps_and_scales() {
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(7.5), 255);
    }

    #[test]
    fn ppm_layout() {
        let mut img = Image::new(2, 2);
        *img.at_mut(0, 0) = Colour::new(1.0, 0.0, 0.0);
        *img.at_mut(1, 1) = Colour::new(0.0, 0.5, 1.0);
        assert_eq!(
            ppm(&img),
            "P3\n2 2\n255\n255 0 0\n0 0 0\n0 0 0\n0 128 255\n"
        );
    }

    #[test]
    fn serialization_is_idempotent() {
        let mut img = Image::new(3, 2);
        *img.at_mut(2, 1) = Colour::new(0.3, 0.6, 0.9);
        assert_eq!(ppm(&img), ppm(&img));
    }

    #[test]
    fn last_pixel_is_addressable() {
        let img = Image::new(4, 3);
        assert_eq!(*img.at(3, 2), Colour::ZERO);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn column_past_width_panics() {
        let img = Image::new(4, 3);
        img.at(4, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn row_past_height_panics() {
        let mut img = Image::new(4, 3);
        img.at_mut(0, 3);
    }

    #[test]
    fn aspect_ratio_sets_height() {
        let img = Image::with_aspect_ratio(64, 16.0 / 9.0);
        assert_eq!((img.width(), img.height()), (64, 36));
        assert_eq!(Image::with_aspect_ratio(1, 16.0 / 9.0).height(), 1);
    }

    #[test]
    fn height_for_aspect_truncates() {
        assert_eq!(height_for_aspect(400, 16.0 / 9.0), 225);
        assert_eq!(height_for_aspect(100, 16.0 / 9.0), 56);
        assert_eq!(height_for_aspect(10, 3.0), 3);
        assert_eq!(height_for_aspect(0, 16.0 / 9.0), 1);
    }

    #[test]
    fn scale_brightness_scales_every_pixel() {
        let mut img = Image::new(2, 1);
        *img.at_mut(0, 0) = Colour::splat(4.0);
        *img.at_mut(1, 0) = Colour::splat(2.0);
        img.scale_brightness(0.25);
        assert_eq!(img.pixels(), &[Colour::splat(1.0), Colour::splat(0.5)]);
    }

    #[test]
    fn gamma_correct_takes_square_roots() {
        let mut img = Image::new(1, 1);
        *img.at_mut(0, 0) = Colour::new(0.25, 1.0, 0.0);
        img.gamma_correct();
        assert_eq!(*img.at(0, 0), Colour::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn rgb8_matches_ppm_quantisation() {
        let mut img = Image::new(2, 1);
        *img.at_mut(1, 0) = Colour::new(0.5, 2.0, -1.0);
        let rgb = img.to_rgb8();
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([128, 255, 0]));
        assert_eq!(rgb.dimensions(), (2, 1));
    }

    #[test]
    fn rows_are_top_first() {
        let mut img = Image::new(2, 3);
        img.par_rows_mut().for_each(|(y, row)| {
            for px in row.iter_mut() {
                *px = Colour::splat(y as f32);
            }
        });
        assert_eq!(*img.at(1, 0), Colour::ZERO);
        assert_eq!(*img.at(0, 2), Colour::splat(2.0));
    }
}
