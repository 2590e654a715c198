use std::f64::consts::FRAC_PI_2;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{KinescopeError, KinescopeResult};
use crate::foundation::math::{STANDARD_GRAVITY, pendulum_period};
use crate::geometry::point::Point;
use crate::geometry::vector::Vector;
use crate::machine::{Clock, Machine, Shared, read};
use crate::scene::field::Field;
use crate::scene::viewport::Viewport;

/// Look-back window of the backward-difference velocity estimate, in seconds.
pub const VELOCITY_WINDOW: f64 = 0.1;

/// Label color for the bob coordinate readout.
pub const LABEL_COLOR: Rgb8 = Rgb8::new(0, 0, 170);

/// Simple pendulum swinging in closed form.
///
/// The arm angle follows `angle_zero · cos(t / sqrt(r / g)) − 90°`, where `angle_zero` is the
/// initial arm angle shifted by +90° so that "straight down" is zero. This is the small-angle
/// solution driven by the initial displacement as amplitude; it is not integrated, and it stays
/// periodic with period `2π · sqrt(r / g)` for any release angle.
#[derive(Clone, Debug)]
pub struct Pendulum {
    clock: Clock,
    pivot: Point,
    rest_arm: Vector,
    arm: Vector,
    angle_zero: f64,
}

impl Pendulum {
    /// Pendulum hanging from `pivot` whose bob starts at `pivot + arm`.
    pub fn new(pivot: Point, arm: Vector) -> KinescopeResult<Self> {
        if !(pivot.x.is_finite() && pivot.y.is_finite()) {
            return Err(KinescopeError::validation(format!(
                "pendulum pivot must be finite, got {pivot:?}"
            )));
        }
        let r = arm.magnitude();
        if !r.is_finite() || r <= 0.0 {
            return Err(KinescopeError::validation(format!(
                "pendulum arm must have a finite non-zero length, got {arm:?}"
            )));
        }

        Ok(Self {
            clock: Clock::default(),
            pivot,
            rest_arm: arm,
            arm,
            angle_zero: arm.angle() + FRAC_PI_2,
        })
    }

    /// Pendulum of arm `length` released at `angle_deg` (degrees, counter-clockwise from +x).
    pub fn from_polar(pivot: Point, length: f64, angle_deg: f64) -> KinescopeResult<Self> {
        Self::new(pivot, Vector::from_polar(length, angle_deg.to_radians()))
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Current arm, pivot to bob.
    pub fn arm(&self) -> Vector {
        self.arm
    }

    pub fn length(&self) -> f64 {
        self.rest_arm.magnitude()
    }

    /// Release angle shifted so that hanging straight down is zero, in radians.
    pub fn angle_zero(&self) -> f64 {
        self.angle_zero
    }

    pub fn period(&self) -> f64 {
        pendulum_period(self.length())
    }

    /// Arm at simulation time `t`, without touching the pendulum's own time.
    pub fn arm_at(&self, t: f64) -> Vector {
        let k = (self.length() / STANDARD_GRAVITY).sqrt();
        let angle = self.angle_zero * (t / k).cos() - FRAC_PI_2;
        self.rest_arm.align(Vector::from_polar(1.0, angle))
    }

    /// Bob position at the current time.
    pub fn bob(&self) -> Point {
        self.pivot.translate(self.arm)
    }

    pub fn bob_at(&self, t: f64) -> Point {
        self.pivot.translate(self.arm_at(t))
    }

    /// Backward-difference speed of the bob at `t` over [`VELOCITY_WINDOW`].
    pub fn velocity_at(&self, t: f64) -> f64 {
        (self.arm_at(t) - self.arm_at(t - VELOCITY_WINDOW)).magnitude() / VELOCITY_WINDOW
    }

    pub fn velocity(&self) -> f64 {
        self.velocity_at(self.clock.get())
    }

    /// Current bob position, read at draw time.
    pub fn bob_field(handle: &Shared<Self>) -> Field<Point> {
        let h = handle.clone();
        Field::resolver(move || read(&h, Pendulum::bob))
    }

    /// Current bob position moved by `(dx, dy)`.
    pub fn bob_offset_field(handle: &Shared<Self>, dx: f64, dy: f64) -> Field<Point> {
        let h = handle.clone();
        Field::with_args(
            move |args: &[f64]| {
                let offset = Point::new(args[0], args[1]);
                read(&h, |p| p.bob().translate(offset))
            },
            [dx, dy],
        )
    }

    /// Current bob position formatted as `(x, y)`.
    pub fn bob_label_field(handle: &Shared<Self>) -> Field<String> {
        let h = handle.clone();
        Field::resolver(move || read(&h, |p| p.bob().to_string()))
    }

    /// `(t, speed)` sample for plotting speed against time.
    pub fn velocity_sample_field(handle: &Shared<Self>) -> Field<Point> {
        let h = handle.clone();
        Field::resolver(move || read(&h, |p| Point::new(p.time(), p.velocity())))
    }

    /// Rod, pivot block, bob and a coordinate label, all following the pendulum.
    pub fn visualize_basic(
        handle: &Shared<Self>,
    ) -> impl FnOnce(&mut Viewport) -> KinescopeResult<()> + use<> {
        let handle = handle.clone();
        move |vp: &mut Viewport| {
            let pivot = read(&handle, Pendulum::pivot)?;
            vp.add_line(pivot, Self::bob_field(&handle), 0.01, Rgb8::BLACK);
            vp.add_rectangle(
                pivot.translate(Point::new(-0.1, 0.1)),
                pivot.translate(Point::new(0.1, 0.0)),
                Rgb8::BLACK,
            );
            vp.add_circle(Self::bob_field(&handle), 0.05, Rgb8::BLACK);
            vp.add_text(
                Self::bob_offset_field(&handle, -0.5, -0.2),
                Self::bob_label_field(&handle),
                LABEL_COLOR,
            );
            Ok(())
        }
    }

    /// A marker at `(t, speed)`, for a speed-against-time viewport.
    pub fn visualize_velocity(
        handle: &Shared<Self>,
    ) -> impl FnOnce(&mut Viewport) -> KinescopeResult<()> + use<> {
        let handle = handle.clone();
        move |vp: &mut Viewport| {
            vp.add_circle(Self::velocity_sample_field(&handle), 0.05, Rgb8::BLACK);
            Ok(())
        }
    }
}

impl Machine for Pendulum {
    fn set_time(&mut self, t: f64) {
        self.clock.set(t);
        self.arm = self.arm_at(t);
    }

    fn time(&self) -> f64 {
        self.clock.get()
    }

    fn label(&self) -> String {
        format!("pendulum(pivot {}, arm {})", self.pivot, self.arm)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/machine/pendulum.rs"]
mod tests;
