use std::collections::HashSet;

use crate::config::model::{
    AnimationDef, AxisDef, MachineDef, PendulumDef, SceneDef, TimerDef, ViewportDef,
    VisualizationDef, VisualizationStyle,
};
use crate::encode::sink::FrameSink;
use crate::foundation::core::{Canvas, PixelRect, Rgb8};
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::foundation::math::pendulum_length;
use crate::geometry::point::Point;
use crate::machine::pendulum::Pendulum;
use crate::machine::timer::Timer;
use crate::scene::transform::{ViewRect, ViewTransform};
use crate::scene::viewport::{Viewport, check_axis_steps};
use crate::world::{MotionBlur, RenderStats, World};

/// A built scene: the live world plus how to animate it.
#[derive(Debug)]
pub struct Scene {
    pub world: World,
    pub blur: MotionBlur,
    pub duration: f64,
}

impl Scene {
    /// Render the whole animation into `sink`.
    pub fn render(&mut self, sink: &mut dyn FrameSink) -> KinescopeResult<RenderStats> {
        self.world.render_sequence(self.duration, &self.blur, sink)
    }
}

impl AnimationDef {
    pub fn motion_blur(&self) -> KinescopeResult<MotionBlur> {
        match (self.blur, self.fps) {
            (Some(_), Some(_)) => Err(KinescopeError::validation(
                "animation must give at most one of `blur` and `fps`",
            )),
            (Some(k), None) => MotionBlur::new(self.step, k),
            (None, Some(fps)) => MotionBlur::from_fps(self.step, fps),
            (None, None) => MotionBlur::none(self.step),
        }
    }

    fn validate(&self) -> KinescopeResult<()> {
        let blur = self.motion_blur()?;
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(KinescopeError::validation(format!(
                "animation duration must be finite and >= 0, got {}",
                self.duration
            )));
        }
        blur.frame_count(self.duration)?;
        Ok(())
    }
}

impl PendulumDef {
    /// Arm length in metres, from `length` or `period`.
    pub fn arm_length(&self) -> KinescopeResult<f64> {
        let r = match (self.length, self.period) {
            (Some(l), None) => l,
            (None, Some(p)) => {
                if !p.is_finite() || p <= 0.0 {
                    return Err(KinescopeError::validation(format!(
                        "pendulum period must be finite and > 0, got {p}"
                    )));
                }
                pendulum_length(p)
            }
            _ => {
                return Err(KinescopeError::validation(
                    "pendulum must give exactly one of `length` and `period`",
                ));
            }
        };
        if !r.is_finite() || r <= 0.0 {
            return Err(KinescopeError::validation(format!(
                "pendulum length must be finite and > 0, got {r}"
            )));
        }
        Ok(r)
    }

    fn to_pendulum(&self) -> KinescopeResult<Pendulum> {
        if !self.angle_deg.is_finite() {
            return Err(KinescopeError::validation(format!(
                "pendulum angle_deg must be finite, got {}",
                self.angle_deg
            )));
        }
        Pendulum::from_polar(self.pivot, self.arm_length()?, self.angle_deg)
    }
}

impl SceneDef {
    /// Check everything [`SceneDef::build`] would reject, without building.
    pub fn validate(&self) -> KinescopeResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;

        let mut ids = HashSet::new();
        for vp in &self.viewports {
            if vp.id.is_empty() {
                return Err(KinescopeError::validation("viewport id must be non-empty"));
            }
            if !ids.insert(vp.id.as_str()) {
                return Err(KinescopeError::validation(format!(
                    "duplicate viewport id '{}'",
                    vp.id
                )));
            }
            ViewTransform::derive(vp.rect, vp.target)
                .map_err(|e| in_context(e, format!("viewport '{}'", vp.id)))?;
            if let Some(axis) = &vp.axis {
                check_axis_steps(vp.rect, axis.small_step, axis.large_step)
                    .map_err(|e| in_context(e, format!("viewport '{}'", vp.id)))?;
            }
        }

        for (i, m) in self.machines.iter().enumerate() {
            match m {
                MachineDef::Pendulum(p) => {
                    p.to_pendulum()
                        .map_err(|e| in_context(e, format!("machine {i} (pendulum)")))?;
                }
                MachineDef::Timer(t) => {
                    if !(t.position.x.is_finite() && t.position.y.is_finite()) {
                        return Err(KinescopeError::validation(format!(
                            "machine {i} (timer): position must be finite"
                        )));
                    }
                }
            }
            for v in m.visualizations() {
                if !ids.contains(v.viewport.as_str()) {
                    return Err(KinescopeError::validation(format!(
                        "machine {i} ({}): unknown viewport '{}'",
                        m.kind(),
                        v.viewport
                    )));
                }
                if v.style == VisualizationStyle::Velocity && !matches!(m, MachineDef::Pendulum(_))
                {
                    return Err(KinescopeError::validation(format!(
                        "machine {i} ({}): velocity visualization needs a pendulum",
                        m.kind()
                    )));
                }
            }
        }

        self.animation.validate()
    }

    /// Validate and assemble the live world.
    pub fn build(&self) -> KinescopeResult<Scene> {
        self.validate()?;

        let mut world = World::new(self.canvas.width, self.canvas.height, self.background)?;
        let mut viewports = self
            .viewports
            .iter()
            .map(|def| {
                let mut vp = Viewport::new(def.rect, def.background)?;
                if let Some(axis) = &def.axis {
                    vp.add_axis(axis.small_step, axis.large_step, axis.color)?;
                }
                Ok((def.id.as_str(), vp))
            })
            .collect::<KinescopeResult<Vec<_>>>()?;

        for m in &self.machines {
            match m {
                MachineDef::Pendulum(def) => {
                    let handle = world.add_machine(def.to_pendulum()?);
                    for v in &def.visualizations {
                        let vp = viewport_mut(&mut viewports, v)?;
                        match v.style {
                            VisualizationStyle::Basic => {
                                vp.add_visualization(Pendulum::visualize_basic(&handle))?
                            }
                            VisualizationStyle::Velocity => {
                                vp.add_visualization(Pendulum::visualize_velocity(&handle))?
                            }
                        }
                    }
                }
                MachineDef::Timer(def) => {
                    let handle = world.add_machine(Timer::new(def.position));
                    for v in &def.visualizations {
                        viewport_mut(&mut viewports, v)?
                            .add_visualization(Timer::visualize_basic(&handle))?;
                    }
                }
            }
        }

        for ((_, vp), def) in viewports.into_iter().zip(&self.viewports) {
            world.add_viewport(vp, def.target)?;
        }

        tracing::debug!(
            viewports = self.viewports.len(),
            machines = self.machines.len(),
            "scene built"
        );
        Ok(Scene {
            world,
            blur: self.animation.motion_blur()?,
            duration: self.animation.duration,
        })
    }

    /// Two pendulums with 2 s and 4 s periods, a timer, and a speed-against-time strip above.
    pub fn pendulum_demo() -> Self {
        let width = 500u32;
        let height = 600u32;
        let strip = f64::from(height) / 6.0;

        let main = |style| VisualizationDef {
            viewport: "main".to_owned(),
            style,
        };
        let speed = VisualizationDef {
            viewport: "speed".to_owned(),
            style: VisualizationStyle::Velocity,
        };

        Self {
            canvas: Canvas { width, height },
            background: Rgb8::new(255, 0, 0),
            viewports: vec![
                ViewportDef {
                    id: "main".to_owned(),
                    rect: ViewRect::new(-3.0, 3.0, 3.0, -3.0),
                    target: PixelRect::new(0.0, strip, f64::from(width), f64::from(height)),
                    background: Some(Rgb8::BEIGE),
                    axis: Some(AxisDef {
                        small_step: 0.2,
                        large_step: 1.0,
                        color: Rgb8::GRAY,
                    }),
                },
                ViewportDef {
                    id: "speed".to_owned(),
                    rect: ViewRect::new(-4.0, 7.0, 8.0, -0.5),
                    target: PixelRect::new(0.0, 0.0, f64::from(width), strip),
                    background: Some(Rgb8::new(0, 200, 0)),
                    axis: None,
                },
            ],
            machines: vec![
                MachineDef::Pendulum(PendulumDef {
                    pivot: Point::new(0.0, 1.0),
                    length: None,
                    period: Some(2.0),
                    angle_deg: 320.0,
                    visualizations: vec![main(VisualizationStyle::Basic), speed.clone()],
                }),
                MachineDef::Pendulum(PendulumDef {
                    pivot: Point::new(0.0, 2.0),
                    length: None,
                    period: Some(4.0),
                    angle_deg: 300.0,
                    visualizations: vec![main(VisualizationStyle::Basic), speed],
                }),
                MachineDef::Timer(TimerDef {
                    position: Point::new(2.0, 2.0),
                    visualizations: vec![main(VisualizationStyle::Basic)],
                }),
            ],
            animation: AnimationDef {
                step: 0.05,
                duration: 4.0,
                blur: Some(2),
                fps: None,
            },
        }
    }
}

/// Prefix a validation message with where in the scene it came from.
fn in_context(e: KinescopeError, at: String) -> KinescopeError {
    match e {
        KinescopeError::Validation(msg) => KinescopeError::Validation(format!("{at}: {msg}")),
        other => other,
    }
}

fn viewport_mut<'a>(
    viewports: &'a mut [(&str, Viewport)],
    v: &VisualizationDef,
) -> KinescopeResult<&'a mut Viewport> {
    viewports
        .iter_mut()
        .find(|(id, _)| *id == v.viewport)
        .map(|(_, vp)| vp)
        .ok_or_else(|| KinescopeError::validation(format!("unknown viewport '{}'", v.viewport)))
}

#[cfg(test)]
#[path = "../../tests/unit/config/build.rs"]
mod tests;
