//! Raster backends behind the [`surface::Surface`] seam.
//!
//! - [`cpu::CpuSurface`] rasterizes with `vello_cpu`
//! - [`record::RecordingSurface`] keeps a display list for inspection
//! - [`composite`] blends whole frames for motion blur

pub mod composite;
pub mod cpu;
pub mod record;
pub mod surface;
pub mod text;
