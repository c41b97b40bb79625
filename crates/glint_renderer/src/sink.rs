//! Pixel sinks: where finished pixels go.
//!
//! A sink is told the image size once, then receives linear colors in scan
//! order (rows top to bottom, columns left to right). No coordinates travel
//! with the colors, so sinks rely on that order.

use std::io::Write;
use std::path::Path;

use crate::error::RenderResult;
use glint_math::{Color, Interval};

/// Receives rendered pixels in scan order.
pub trait PixelSink {
    /// Called once before the first pixel.
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Linear RGB, averaged over the pixel's samples, not yet gamma corrected.
    fn write_pixel(&mut self, color: Color) -> RenderResult<()>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.000, 0.999);
    let quantize = |linear: f32| (256.0 * intensity.clamp(linear_to_gamma(linear))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Writes a plain-text PPM (P3) image.
pub struct PpmSink<W: Write> {
    writer: W,
}

impl<W: Write> PpmSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmSink<W> {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "255")?;
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> RenderResult<()> {
        let [r, g, b] = color_to_rgb8(color);
        writeln!(self.writer, "{} {} {}", r, g, b)?;
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Simple image buffer for storing render output.
///
/// Keeps the linear colors so they can be inspected, or encoded later.
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Convert to gamma corrected 8-bit RGB.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb8(self.get(x, y)))
        })
    }

    /// Encode as PNG (or any format `image` infers from the extension).
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.to_rgb8().save(path)?;
        Ok(())
    }
}

impl PixelSink for ImageBuffer {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.reserve((width * height) as usize);
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> RenderResult<()> {
        self.pixels.push(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::new(0.25, -0.5, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_ppm_output() {
        let mut sink = PpmSink::new(Vec::new());
        sink.begin(2, 1).unwrap();
        sink.write_pixel(Color::new(1.0, 0.0, 0.0)).unwrap();
        sink.write_pixel(Color::new(0.0, 0.25, 1.0)).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 0\n0 128 255\n");
    }

    #[test]
    fn test_image_buffer_row_major() {
        let mut image = ImageBuffer::default();
        image.begin(3, 2).unwrap();
        for k in 0..6 {
            image.write_pixel(Color::splat(k as f32)).unwrap();
        }

        assert_eq!(image.get(0, 0), Color::splat(0.0));
        assert_eq!(image.get(2, 0), Color::splat(2.0));
        assert_eq!(image.get(0, 1), Color::splat(3.0));
        assert_eq!(image.get(2, 1), Color::splat(5.0));
    }

    #[test]
    fn test_image_buffer_to_rgb8() {
        let mut image = ImageBuffer::default();
        image.begin(1, 1).unwrap();
        image.write_pixel(Color::new(0.25, 0.0, 1.0)).unwrap();

        let rgb = image.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [128, 0, 255]);
    }
}
