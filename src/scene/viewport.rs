use crate::foundation::core::Rgb8;
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::foundation::math::ticks_toward;
use crate::geometry::point::Point;
use crate::render::surface::Surface;
use crate::scene::drawable::{Circle, Drawable, Line, Rectangle, Text};
use crate::scene::field::Field;
use crate::scene::transform::{ViewRect, ViewTransform};

/// Upper bound on the ticks one axis step may place on each half-axis.
pub const MAX_AXIS_TICKS: u64 = 10_000;

/// An ordered paint list defined in its own internal coordinate rectangle.
///
/// A viewport knows nothing about pixels until a [`crate::World`] attaches it to a target
/// rectangle; the same viewport description can be placed anywhere on a canvas.
#[derive(Clone, Debug)]
pub struct Viewport {
    rect: ViewRect,
    background: Option<Rgb8>,
    objects: Vec<Drawable>,
}

impl Viewport {
    /// New viewport over `rect`. A background, if given, becomes the first drawable.
    pub fn new(rect: ViewRect, background: Option<Rgb8>) -> KinescopeResult<Self> {
        rect.validate()?;
        let mut vp = Self {
            rect,
            background,
            objects: Vec::new(),
        };
        if let Some(color) = background {
            vp.add_object(Rectangle::new(
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x2, rect.y2),
                color,
            ));
        }
        Ok(vp)
    }

    pub fn rect(&self) -> ViewRect {
        self.rect
    }

    pub fn background(&self) -> Option<Rgb8> {
        self.background
    }

    /// Drawables in paint order.
    pub fn objects(&self) -> &[Drawable] {
        &self.objects
    }

    pub fn add_object(&mut self, drawable: impl Into<Drawable>) {
        self.objects.push(drawable.into());
    }

    pub fn add_circle(
        &mut self,
        center: impl Into<Field<Point>>,
        radius: impl Into<Field<f64>>,
        color: impl Into<Field<Rgb8>>,
    ) {
        self.add_object(Circle::new(center, radius, color));
    }

    pub fn add_line(
        &mut self,
        start: impl Into<Field<Point>>,
        end: impl Into<Field<Point>>,
        width: impl Into<Field<f64>>,
        color: impl Into<Field<Rgb8>>,
    ) {
        self.add_object(Line::new(start, end, width, color));
    }

    pub fn add_rectangle(
        &mut self,
        top_left: impl Into<Field<Point>>,
        bottom_right: impl Into<Field<Point>>,
        color: impl Into<Field<Rgb8>>,
    ) {
        self.add_object(Rectangle::new(top_left, bottom_right, color));
    }

    pub fn add_text(
        &mut self,
        anchor: impl Into<Field<Point>>,
        text: impl Into<Field<String>>,
        color: impl Into<Field<Rgb8>>,
    ) {
        self.add_object(Text::new(anchor, text, color));
    }

    /// Axis lines through the origin plus tick crossbars every `small_step` (short) and every
    /// `large_step` (tall), in both directions, never past the viewport's edges.
    pub fn add_axis(&mut self, small_step: f64, large_step: f64, color: Rgb8) -> KinescopeResult<()> {
        check_axis_steps(self.rect, small_step, large_step)?;

        let r = self.rect;
        self.add_line(Point::new(0.0, r.y1), Point::new(0.0, r.y2), 0.0, color);
        self.add_line(Point::new(r.x1, 0.0), Point::new(r.x2, 0.0), 0.0, color);

        // Tick heights are derived from the small step for both densities.
        self.add_ticks(small_step, small_step / 4.0, color);
        self.add_ticks(large_step, small_step / 2.0, color);
        Ok(())
    }

    fn add_ticks(&mut self, step: f64, half_len: f64, color: Rgb8) {
        let r = self.rect;
        for bound in [r.x1, r.x2] {
            for x in ticks_toward(step, bound) {
                self.add_line(Point::new(x, -half_len), Point::new(x, half_len), 0.0, color);
            }
        }
        for bound in [r.y1, r.y2] {
            for y in ticks_toward(step, bound) {
                self.add_line(Point::new(-half_len, y), Point::new(half_len, y), 0.0, color);
            }
        }
    }

    /// Let `visualize` populate this viewport, usually with drawables bound to a machine.
    pub fn add_visualization<F>(&mut self, visualize: F) -> KinescopeResult<()>
    where
        F: FnOnce(&mut Viewport) -> KinescopeResult<()>,
    {
        visualize(self)
    }

    /// Draw every object in paint order. Stops at the first failing drawable.
    pub fn draw(&self, surface: &mut dyn Surface, transform: &ViewTransform) -> KinescopeResult<()> {
        for obj in &self.objects {
            obj.draw(surface, transform)?;
        }
        Ok(())
    }
}

/// Reject axis steps that are not positive or would place more than [`MAX_AXIS_TICKS`] ticks on
/// any half-axis of `rect`.
pub(crate) fn check_axis_steps(
    rect: ViewRect,
    small_step: f64,
    large_step: f64,
) -> KinescopeResult<()> {
    for (name, step) in [("small_step", small_step), ("large_step", large_step)] {
        if !step.is_finite() || step <= 0.0 {
            return Err(KinescopeError::validation(format!(
                "axis {name} must be finite and > 0, got {step}"
            )));
        }
        let reach = [rect.x1, rect.x2, rect.y1, rect.y2]
            .into_iter()
            .map(f64::abs)
            .fold(0.0, f64::max);
        if (reach / step).floor() >= MAX_AXIS_TICKS as f64 {
            return Err(KinescopeError::validation(format!(
                "axis {name} {step} puts more than {MAX_AXIS_TICKS} ticks on a half-axis"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/viewport.rs"]
mod tests;
