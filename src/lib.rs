//! Kinescope renders time-driven machines (pendulums, timers) into animation frames.
//!
//! A scene is a [`World`] holding machines and placed [`Viewport`]s. Each viewport has its own
//! internal coordinate rectangle; drawables inside it are described in those coordinates with
//! [`Field`]s that are either constant or read live machine state at draw time.
//!
//! - Build a world by hand, or load a [`SceneDef`] from JSON and [`SceneDef::build`] it
//! - Advance it with [`World::set_time`] and rasterize with [`World::get_frame`]
//! - Stream a motion-blurred sequence into a [`FrameSink`] with [`World::render_sequence`]
#![forbid(unsafe_code)]

pub mod config;
pub mod encode;
pub mod foundation;
pub mod geometry;
pub mod machine;
pub mod render;
pub mod scene;
pub mod world;

pub use crate::config::{Scene, SceneDef};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::foundation::core::{Canvas, PixelPoint, PixelRect, Rgb8};
pub use crate::foundation::error::{KinescopeError, KinescopeResult};
pub use crate::geometry::point::Point;
pub use crate::geometry::vector::Vector;
pub use crate::machine::pendulum::Pendulum;
pub use crate::machine::timer::Timer;
pub use crate::machine::{Machine, Shared};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::record::{DrawCommand, RecordingSurface};
pub use crate::render::surface::{Frame, Surface};
pub use crate::render::text::TextStyle;
pub use crate::scene::drawable::{Circle, Drawable, Line, Rectangle, Text};
pub use crate::scene::field::{Field, FieldMode};
pub use crate::scene::transform::{ViewRect, ViewTransform};
pub use crate::scene::viewport::Viewport;
pub use crate::world::{MotionBlur, RenderStats, World};
