use crate::foundation::core::Rgb8;
use crate::foundation::error::KinescopeResult;
use crate::geometry::point::Point;
use crate::machine::{Clock, Machine, Shared, read};
use crate::scene::field::Field;
use crate::scene::viewport::Viewport;

/// Elapsed-time readout at a fixed internal position.
#[derive(Clone, Debug)]
pub struct Timer {
    clock: Clock,
    position: Point,
}

impl Timer {
    pub fn new(position: Point) -> Self {
        Self {
            clock: Clock::default(),
            position,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Current time with two decimals, e.g. `"1.50 s"`.
    pub fn display_text(&self) -> String {
        format!("{:.2} s", self.clock.get())
    }

    pub fn text_field(handle: &Shared<Self>) -> Field<String> {
        let h = handle.clone();
        Field::resolver(move || read(&h, Timer::display_text))
    }

    /// Black time text anchored at the timer's position.
    pub fn visualize_basic(
        handle: &Shared<Self>,
    ) -> impl FnOnce(&mut Viewport) -> KinescopeResult<()> + use<> {
        let handle = handle.clone();
        move |vp: &mut Viewport| {
            let at = read(&handle, Timer::position)?;
            vp.add_text(at, Self::text_field(&handle), Rgb8::BLACK);
            Ok(())
        }
    }
}

impl Machine for Timer {
    fn set_time(&mut self, t: f64) {
        self.clock.set(t);
    }

    fn time(&self) -> f64 {
        self.clock.get()
    }

    fn label(&self) -> String {
        format!("timer at {}", self.position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/machine/timer.rs"]
mod tests;
