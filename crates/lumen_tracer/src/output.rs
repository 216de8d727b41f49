//! Output pixel buffer and its adapters.
//!
//! The buffer stores display-ready colors (already averaged and gamma
//! corrected), row-major with row 0 at the top of the image. Adapters turn it
//! into a plain-text PPM, RGBA8 texels for texture upload, or any format the
//! `image` crate can encode.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

use crate::{Color, RenderError, RenderResult};

/// Scale used when quantizing a [0, 1] channel to 8 bits.
pub const CHANNEL_SCALE: f32 = 255.99;

/// One 8-bit RGBA texel, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Quantize a color, clamping each channel to [0, 1]. Non-finite channels become 0.
    pub fn from_color(color: Color) -> Self {
        Self {
            r: quantize(color.x),
            g: quantize(color.y),
            b: quantize(color.z),
            a: 255,
        }
    }
}

#[inline]
fn quantize(channel: f32) -> u8 {
    if channel.is_finite() {
        (CHANNEL_SCALE * channel.clamp(0.0, 1.0)) as u8
    } else {
        0
    }
}

/// View a texel slice as raw bytes.
pub fn as_bytes(texels: &[Rgba8]) -> &[u8] {
    bytemuck::cast_slice(texels)
}

/// Row-major buffer of display colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels; the length must be `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> RenderResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row 0 first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Write the buffer as a plain-text (P3) PPM.
    ///
    /// Channels are scaled by 255.99 and truncated, without clamping.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for color in &self.pixels {
            let r = (CHANNEL_SCALE * color.x) as i32;
            let g = (CHANNEL_SCALE * color.y) as i32;
            let b = (CHANNEL_SCALE * color.z) as i32;
            writeln!(writer, "{r} {g} {b}")?;
        }

        writer.flush()
    }

    /// Convert to RGBA8 texels (for display or upload).
    pub fn to_rgba8(&self) -> Vec<Rgba8> {
        self.pixels.par_iter().map(|&c| Rgba8::from_color(c)).collect()
    }

    /// Save to `path`, choosing the format from the extension.
    ///
    /// `.ppm` writes the plain-text PPM; anything else goes through the
    /// `image` encoders as 8-bit RGB.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            let rgb: Vec<u8> = self
                .to_rgba8()
                .par_iter()
                .flat_map_iter(|t| [t.r, t.g, t.b])
                .collect();
            image::save_buffer(path, &rgb, self.width, self.height, image::ColorType::Rgb8)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
