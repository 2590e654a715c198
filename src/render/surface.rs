use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{PixelPoint, Rect, Rgb8};
use crate::foundation::error::{KinescopeError, KinescopeResult};

/// Raster target that drawables paint onto, in device pixels.
///
/// Every drawable issues exactly one call per `draw`. Coordinates may lie outside the canvas;
/// implementations clip or ignore out-of-bounds geometry themselves.
pub trait Surface {
    /// Filled ellipse inscribed in `bounds`.
    fn fill_ellipse(&mut self, bounds: Rect, color: Rgb8) -> KinescopeResult<()>;

    /// Straight line. A `width` of 0 is a hairline.
    fn line(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        width: u32,
        color: Rgb8,
    ) -> KinescopeResult<()>;

    /// Filled axis-aligned rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Rgb8) -> KinescopeResult<()>;

    /// Text with its top-left corner at `anchor`.
    fn text(&mut self, anchor: PixelPoint, text: &str, color: Rgb8) -> KinescopeResult<()>;
}

/// A rendered frame: opaque RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// A frame filled with `color`.
    pub fn solid(width: u32, height: u32, color: Rgb8) -> Self {
        let px = color.to_rgba8();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Color of the pixel at `(x, y)`, alpha dropped.
    pub fn rgb(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.pixel(x, y).map(|[r, g, b, _]| Rgb8::new(r, g, b))
    }

    pub fn to_rgb_image(&self) -> KinescopeResult<image::RgbImage> {
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .ok_or_else(|| KinescopeError::render("frame byte length does not match its size"))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> KinescopeResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
