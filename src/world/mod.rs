//! The world: machines, placed viewports, and frame composition over time.

pub mod blur;
pub mod core;

pub use self::blur::{MotionBlur, RenderStats};
pub use self::core::World;
