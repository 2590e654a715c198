//! JSON-facing scene description.
//!
//! A [`SceneDef`] is plain data: it names viewports by id and binds machine visualizations to
//! them by reference. It becomes a live [`crate::World`] through [`SceneDef::build`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, PixelRect, Rgb8};
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::geometry::point::Point;
use crate::scene::transform::ViewRect;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    pub canvas: Canvas,
    #[serde(default = "default_background")]
    pub background: Rgb8,
    /// Paint order: later viewports cover earlier ones.
    pub viewports: Vec<ViewportDef>,
    #[serde(default)]
    pub machines: Vec<MachineDef>,
    pub animation: AnimationDef,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportDef {
    pub id: String,
    /// Internal coordinates `[x1, y1, x2, y2]`; `(x1, y1)` lands on the target's top-left.
    pub rect: ViewRect,
    /// Pixel rectangle `[x1, y1, x2, y2]` on the canvas.
    pub target: PixelRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisDef {
    pub small_step: f64,
    pub large_step: f64,
    #[serde(default = "default_axis_color")]
    pub color: Rgb8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MachineDef {
    Pendulum(PendulumDef),
    Timer(TimerDef),
}

impl MachineDef {
    pub fn visualizations(&self) -> &[VisualizationDef] {
        match self {
            Self::Pendulum(p) => &p.visualizations,
            Self::Timer(t) => &t.visualizations,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pendulum(_) => "pendulum",
            Self::Timer(_) => "timer",
        }
    }
}

/// A pendulum sized by exactly one of `length` (metres) or `period` (seconds).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PendulumDef {
    pub pivot: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    /// Release angle in degrees, counter-clockwise from +x.
    pub angle_deg: f64,
    #[serde(default)]
    pub visualizations: Vec<VisualizationDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimerDef {
    pub position: Point,
    #[serde(default)]
    pub visualizations: Vec<VisualizationDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualizationDef {
    pub viewport: String,
    #[serde(default)]
    pub style: VisualizationStyle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationStyle {
    #[default]
    Basic,
    Velocity,
}

/// Output timing: frames every `step` seconds up to `duration`, each blurred over `blur`
/// sub-samples (or as many as `fps` implies).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDef {
    pub step: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

fn default_background() -> Rgb8 {
    Rgb8::WHITE
}

fn default_axis_color() -> Rgb8 {
    Rgb8::GRAY
}

impl SceneDef {
    /// Parse a scene from a JSON reader. Structure only; see [`SceneDef::validate`].
    pub fn from_reader<R: std::io::Read>(r: R) -> KinescopeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KinescopeError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> KinescopeResult<Self> {
        serde_json::from_str(s).map_err(|e| KinescopeError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> KinescopeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KinescopeError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> KinescopeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KinescopeError::serde(format!("serialize scene JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
