use std::fmt;
use std::sync::Arc;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{KinescopeError, KinescopeResult};

/// Font and size used for every text drawable on a surface.
#[derive(Clone)]
pub struct TextStyle {
    pub font_bytes: Arc<Vec<u8>>,
    pub size_px: f32,
}

impl TextStyle {
    pub fn new(font_bytes: impl Into<Vec<u8>>, size_px: f32) -> KinescopeResult<Self> {
        let font_bytes = font_bytes.into();
        if font_bytes.is_empty() {
            return Err(KinescopeError::validation("text font bytes must be non-empty"));
        }
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(KinescopeError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        Ok(Self {
            font_bytes: Arc::new(font_bytes),
            size_px,
        })
    }

    /// Read a TTF/OTF file from disk.
    pub fn from_path(path: impl AsRef<std::path::Path>, size_px: f32) -> KinescopeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            KinescopeError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::new(bytes, size_px)
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStyle")
            .field("font_bytes", &format_args!("{} bytes", self.font_bytes.len()))
            .field("size_px", &self.size_px)
            .finish()
    }
}

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrush {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Parley contexts plus the family registered from a [`TextStyle`]'s font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
    size_px: f32,
}

impl TextLayoutEngine {
    /// Register `style`'s font and keep the contexts for repeated layouts.
    pub(crate) fn new(style: &TextStyle) -> KinescopeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(style.font_bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            KinescopeError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| KinescopeError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            size_px: style.size_px,
        })
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout_line(&mut self, text: &str, color: Rgb8) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(color)));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
