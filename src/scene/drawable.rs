use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::KinescopeResult;
use crate::foundation::math::ceil_px;
use crate::geometry::point::Point;
use crate::render::surface::Surface;
use crate::scene::field::Field;
use crate::scene::transform::ViewTransform;

/// Filled circle. Radius is an internal length, scaled separately on each axis, so a
/// non-uniform viewport draws it as an ellipse.
#[derive(Clone, Debug)]
pub struct Circle {
    pub center: Field<Point>,
    pub radius: Field<f64>,
    pub color: Field<Rgb8>,
}

impl Circle {
    pub fn new(
        center: impl Into<Field<Point>>,
        radius: impl Into<Field<f64>>,
        color: impl Into<Field<Rgb8>>,
    ) -> Self {
        Self {
            center: center.into(),
            radius: radius.into(),
            color: color.into(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, transform: &ViewTransform) -> KinescopeResult<()> {
        let center = transform.apply(self.center.resolve()?);
        let radius = self.radius.resolve()?;
        let color = self.color.resolve()?;

        let rx = transform.scale_len_x(radius);
        let ry = transform.scale_len_y(radius);
        let bounds = Rect::new(center.x - rx, center.y - ry, center.x + rx, center.y + ry);
        surface.fill_ellipse(bounds, color)
    }
}

/// Straight segment with a logical width in internal units.
#[derive(Clone, Debug)]
pub struct Line {
    pub start: Field<Point>,
    pub end: Field<Point>,
    pub width: Field<f64>,
    pub color: Field<Rgb8>,
}

impl Line {
    pub fn new(
        start: impl Into<Field<Point>>,
        end: impl Into<Field<Point>>,
        width: impl Into<Field<f64>>,
        color: impl Into<Field<Rgb8>>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            width: width.into(),
            color: color.into(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, transform: &ViewTransform) -> KinescopeResult<()> {
        let from = transform.apply(self.start.resolve()?);
        let to = transform.apply(self.end.resolve()?);
        let width = ceil_px(transform.scale_len_x(self.width.resolve()?));
        let color = self.color.resolve()?;
        surface.line(from, to, width, color)
    }
}

/// Filled rectangle spanned by two opposite corners.
#[derive(Clone, Debug)]
pub struct Rectangle {
    pub top_left: Field<Point>,
    pub bottom_right: Field<Point>,
    pub color: Field<Rgb8>,
}

impl Rectangle {
    pub fn new(
        top_left: impl Into<Field<Point>>,
        bottom_right: impl Into<Field<Point>>,
        color: impl Into<Field<Rgb8>>,
    ) -> Self {
        Self {
            top_left: top_left.into(),
            bottom_right: bottom_right.into(),
            color: color.into(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, transform: &ViewTransform) -> KinescopeResult<()> {
        let a = transform.apply(self.top_left.resolve()?);
        let b = transform.apply(self.bottom_right.resolve()?);
        let color = self.color.resolve()?;
        // y flips under most transforms; hand the surface a normalized box.
        surface.fill_rect(Rect::from_points(a, b).abs(), color)
    }
}

/// Text anchored at its top-left corner.
#[derive(Clone, Debug)]
pub struct Text {
    pub anchor: Field<Point>,
    pub text: Field<String>,
    pub color: Field<Rgb8>,
}

impl Text {
    pub fn new(
        anchor: impl Into<Field<Point>>,
        text: impl Into<Field<String>>,
        color: impl Into<Field<Rgb8>>,
    ) -> Self {
        Self {
            anchor: anchor.into(),
            text: text.into(),
            color: color.into(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, transform: &ViewTransform) -> KinescopeResult<()> {
        let anchor = transform.apply(self.anchor.resolve()?);
        let text = self.text.resolve()?;
        let color = self.color.resolve()?;
        surface.text(anchor, &text, color)
    }
}

/// Anything a viewport can paint.
#[derive(Clone, Debug)]
pub enum Drawable {
    Circle(Circle),
    Line(Line),
    Rectangle(Rectangle),
    Text(Text),
}

impl Drawable {
    /// Resolve all fields and issue one surface call.
    pub fn draw(&self, surface: &mut dyn Surface, transform: &ViewTransform) -> KinescopeResult<()> {
        match self {
            Self::Circle(c) => c.draw(surface, transform),
            Self::Line(l) => l.draw(surface, transform),
            Self::Rectangle(r) => r.draw(surface, transform),
            Self::Text(t) => t.draw(surface, transform),
        }
    }
}

impl From<Circle> for Drawable {
    fn from(v: Circle) -> Self {
        Self::Circle(v)
    }
}

impl From<Line> for Drawable {
    fn from(v: Line) -> Self {
        Self::Line(v)
    }
}

impl From<Rectangle> for Drawable {
    fn from(v: Rectangle) -> Self {
        Self::Rectangle(v)
    }
}

impl From<Text> for Drawable {
    fn from(v: Text) -> Self {
        Self::Text(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/drawable.rs"]
mod tests;
