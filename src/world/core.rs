use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::{Canvas, PixelRect, Rgb8};
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::machine::{Machine, Shared, share};
use crate::render::cpu::CpuSurface;
use crate::render::surface::{Frame, Surface};
use crate::render::text::TextStyle;
use crate::scene::transform::ViewTransform;
use crate::scene::viewport::Viewport;

/// Owns machines and placed viewports, and composes full-canvas frames.
///
/// Machines are advanced in insertion order; viewports paint in insertion order, so a later
/// viewport covers an earlier one where their target rectangles overlap.
pub struct World {
    canvas: Canvas,
    background: Rgb8,
    time: f64,
    machines: Vec<Rc<RefCell<dyn Machine>>>,
    viewports: Vec<(Viewport, ViewTransform)>,
    text: Option<TextStyle>,
}

impl World {
    pub fn new(width: u32, height: u32, background: Rgb8) -> KinescopeResult<Self> {
        Ok(Self {
            canvas: Canvas::new(width, height)?,
            background,
            time: 0.0,
            machines: Vec::new(),
            viewports: Vec::new(),
            text: None,
        })
    }

    /// Font used by [`World::get_frame`] for text drawables.
    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        self.text = Some(style);
        self
    }

    pub fn set_text_style(&mut self, style: Option<TextStyle>) {
        self.text = style;
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Time last passed to [`World::set_time`].
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Take ownership of `machine` and return a handle for binding drawables to it.
    pub fn add_machine<M: Machine + 'static>(&mut self, machine: M) -> Shared<M> {
        let handle = share(machine);
        self.add_shared_machine(&handle);
        handle
    }

    /// Register an already shared machine.
    pub fn add_shared_machine<M: Machine + 'static>(&mut self, handle: &Shared<M>) {
        let erased: Rc<RefCell<dyn Machine>> = handle.clone();
        if let Ok(m) = erased.try_borrow() {
            tracing::debug!(machine = %m.label(), index = self.machines.len(), "machine added");
        }
        self.machines.push(erased);
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Place `viewport` on the canvas at `target`. The transform is derived here, once.
    pub fn add_viewport(&mut self, viewport: Viewport, target: PixelRect) -> KinescopeResult<()> {
        let transform = ViewTransform::derive(viewport.rect(), target)?;
        self.viewports.push((viewport, transform));
        Ok(())
    }

    pub fn viewports(&self) -> &[(Viewport, ViewTransform)] {
        &self.viewports
    }

    /// Advance every machine to `t`, in insertion order.
    pub fn set_time(&mut self, t: f64) -> KinescopeResult<()> {
        if !t.is_finite() {
            return Err(KinescopeError::validation(format!(
                "simulation time must be finite, got {t}"
            )));
        }
        for m in &self.machines {
            let mut m = m.try_borrow_mut().map_err(|_| {
                KinescopeError::evaluation("machine is borrowed while the world advances time")
            })?;
            m.set_time(t);
        }
        self.time = t;
        Ok(())
    }

    /// Draw every viewport onto `surface` in insertion order. The surface is expected to be
    /// already filled with the background.
    pub fn draw(&self, surface: &mut dyn Surface) -> KinescopeResult<()> {
        for (viewport, transform) in &self.viewports {
            viewport.draw(surface, transform)?;
        }
        Ok(())
    }

    /// Rasterize the current state on a fresh canvas.
    pub fn get_frame(&self) -> KinescopeResult<Frame> {
        let mut surface = CpuSurface::new(self.canvas.width, self.canvas.height, self.background)?;
        if let Some(style) = &self.text {
            surface = surface.with_text(style)?;
        }
        self.draw(&mut surface)?;
        surface.finish()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("canvas", &self.canvas)
            .field("background", &self.background)
            .field("time", &self.time)
            .field("machines", &self.machines.len())
            .field("viewports", &self.viewports.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/world/core.rs"]
mod tests;
