//! Coordinate-transform scene graph: deferred fields, drawables, viewports, transforms.

pub mod drawable;
pub mod field;
pub mod transform;
pub mod viewport;
