use crate::foundation::core::{Affine, PixelPoint, PixelRect};
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::geometry::point::Point;

/// A viewport's internal coordinate rectangle. `(x1, y1)` is the corner that lands on the
/// target's top-left, so a y-up space is written with `y1 > y2`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct ViewRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ViewRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }

    pub(crate) fn validate(self) -> KinescopeResult<()> {
        let all_finite = [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(KinescopeError::validation(format!(
                "viewport rectangle must be finite, got {self:?}"
            )));
        }
        if self.x1 == self.x2 || self.y1 == self.y2 {
            return Err(KinescopeError::validation(format!(
                "viewport rectangle must have non-zero width and height, got {self:?}"
            )));
        }
        Ok(())
    }
}

impl From<[f64; 4]> for ViewRect {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<ViewRect> for [f64; 4] {
    fn from(r: ViewRect) -> Self {
        [r.x1, r.y1, r.x2, r.y2]
    }
}

/// Mapping from a viewport's internal space to canvas pixels:
/// `px = (x + translate_internal_x) * scale_x + translate_x`, same for y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub translate_internal_x: f64,
    pub translate_internal_y: f64,
}

impl ViewTransform {
    /// Derive the transform that puts `internal`'s corners on `target`'s corners.
    pub fn derive(internal: ViewRect, target: PixelRect) -> KinescopeResult<Self> {
        internal.validate()?;
        let target_finite = [target.x1, target.y1, target.x2, target.y2]
            .iter()
            .all(|v| v.is_finite());
        if !target_finite || target.width() == 0.0 || target.height() == 0.0 {
            return Err(KinescopeError::validation(format!(
                "target pixel rectangle must be finite with non-zero width and height, got {target:?}"
            )));
        }

        Ok(Self {
            scale_x: (target.x2 - target.x1) / (internal.x2 - internal.x1),
            scale_y: (target.y1 - target.y2) / (internal.y1 - internal.y2),
            translate_x: target.x1,
            translate_y: target.y1,
            translate_internal_x: -internal.x1,
            translate_internal_y: -internal.y1,
        })
    }

    pub fn apply(&self, p: Point) -> PixelPoint {
        PixelPoint::new(
            (p.x + self.translate_internal_x) * self.scale_x + self.translate_x,
            (p.y + self.translate_internal_y) * self.scale_y + self.translate_y,
        )
    }

    /// Horizontal pixel length of an internal length.
    pub fn scale_len_x(&self, len: f64) -> f64 {
        len * self.scale_x.abs()
    }

    /// Vertical pixel length of an internal length.
    pub fn scale_len_y(&self, len: f64) -> f64 {
        len * self.scale_y.abs()
    }

    /// Same mapping as [`ViewTransform::apply`] in `kurbo` form.
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate((self.translate_internal_x, self.translate_internal_y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transform.rs"]
mod tests;
