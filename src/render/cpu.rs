use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{PixelPoint, Rect, Rgb8};
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::render::surface::{Frame, Surface};
use crate::render::text::{TextLayoutEngine, TextStyle};

/// Flattening tolerance for curved outlines, in pixels.
const TOLERANCE: f64 = 0.1;

/// [`Surface`] rasterized by `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized once by [`CpuSurface::finish`].
/// The canvas starts filled with the background color, so every frame is fully opaque.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    text: Option<TextPainter>,
}

struct TextPainter {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32, background: Rgb8) -> KinescopeResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| KinescopeError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| KinescopeError::render("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(KinescopeError::render("surface must be non-empty"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_paint(paint(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width_u16),
            f64::from(height_u16),
        ));

        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx,
            text: None,
        })
    }

    /// Enable text drawing with `style`. Without it, text drawables are skipped.
    pub fn with_text(mut self, style: &TextStyle) -> KinescopeResult<Self> {
        let engine = TextLayoutEngine::new(style)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(style.font_bytes.as_ref().clone()),
            0,
        );
        self.text = Some(TextPainter { engine, font });
        Ok(self)
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> KinescopeResult<Frame> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        // The background is opaque and every paint is opaque, so premultiplied bytes are
        // already straight RGBA.
        let data = pixmap.data_as_u8_slice().to_vec();
        let (width, height) = (u32::from(self.width), u32::from(self.height));
        if data.len() != width as usize * height as usize * 4 {
            return Err(KinescopeError::render("pixmap byte length mismatch"));
        }
        Ok(Frame {
            width,
            height,
            data,
        })
    }
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("text", &self.text.is_some())
            .finish_non_exhaustive()
    }
}

impl Surface for CpuSurface {
    fn fill_ellipse(&mut self, bounds: Rect, color: Rgb8) -> KinescopeResult<()> {
        let ellipse = vello_cpu::kurbo::Ellipse::from_rect(rect_to_cpu(bounds));
        self.ctx.set_paint(paint(color));
        self.ctx.fill_path(&ellipse.to_path(TOLERANCE));
        Ok(())
    }

    fn line(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        width: u32,
        color: Rgb8,
    ) -> KinescopeResult<()> {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));

        // Hairlines still cover one pixel.
        let w = f64::from(width.max(1));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(w).with_caps(vello_cpu::kurbo::Cap::Butt),
        );
        self.ctx.set_paint(paint(color));
        self.ctx.stroke_path(&path);
        Ok(())
    }

    fn fill_rect(&mut self, bounds: Rect, color: Rgb8) -> KinescopeResult<()> {
        self.ctx.set_paint(paint(color));
        self.ctx.fill_rect(&rect_to_cpu(bounds));
        Ok(())
    }

    fn text(&mut self, anchor: PixelPoint, text: &str, color: Rgb8) -> KinescopeResult<()> {
        let Some(painter) = self.text.as_mut() else {
            tracing::debug!(text, "no text style configured; skipping text");
            return Ok(());
        };

        let layout = painter.engine.layout_line(text, color);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((anchor.x, anchor.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&painter.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

fn paint(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: PixelPoint) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
