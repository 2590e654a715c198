//! JSON scene files and the built-in demo scene.

pub mod build;
pub mod model;

pub use self::build::Scene;
pub use self::model::{
    AnimationDef, AxisDef, MachineDef, PendulumDef, SceneDef, TimerDef, ViewportDef,
    VisualizationDef, VisualizationStyle,
};
