use crate::foundation::core::{PixelPoint, Rect, Rgb8};
use crate::foundation::error::KinescopeResult;
use crate::render::surface::Surface;

/// One call made against a [`Surface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Ellipse {
        bounds: Rect,
        color: Rgb8,
    },
    Line {
        from: PixelPoint,
        to: PixelPoint,
        width: u32,
        color: Rgb8,
    },
    Rect {
        bounds: Rect,
        color: Rgb8,
    },
    Text {
        anchor: PixelPoint,
        text: String,
        color: Rgb8,
    },
}

/// Surface that captures a display list instead of rasterizing. Useful for inspecting what a
/// scene would draw for a given time.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for RecordingSurface {
    fn fill_ellipse(&mut self, bounds: Rect, color: Rgb8) -> KinescopeResult<()> {
        self.commands.push(DrawCommand::Ellipse { bounds, color });
        Ok(())
    }

    fn line(
        &mut self,
        from: PixelPoint,
        to: PixelPoint,
        width: u32,
        color: Rgb8,
    ) -> KinescopeResult<()> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
        Ok(())
    }

    fn fill_rect(&mut self, bounds: Rect, color: Rgb8) -> KinescopeResult<()> {
        self.commands.push(DrawCommand::Rect { bounds, color });
        Ok(())
    }

    fn text(&mut self, anchor: PixelPoint, text: &str, color: Rgb8) -> KinescopeResult<()> {
        self.commands.push(DrawCommand::Text {
            anchor,
            text: text.to_owned(),
            color,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
