//! Time-parameterized simulation objects.
//!
//! A machine's whole state is a function of the simulation time last passed to
//! [`Machine::set_time`]. Machines are shared between the [`crate::World`] that advances them and
//! the drawables whose fields read them, through single-threaded [`Shared`] handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::foundation::error::{KinescopeError, KinescopeResult};

pub mod pendulum;
pub mod timer;

/// Single-threaded shared handle to a machine.
pub type Shared<M> = Rc<RefCell<M>>;

/// Capability shared by every simulation object.
pub trait Machine: fmt::Debug {
    /// Move to simulation time `t` (seconds). Must be deterministic in `t` alone; calling it twice
    /// with the same `t` leaves identical state.
    fn set_time(&mut self, t: f64);

    /// Time last passed to [`Machine::set_time`].
    fn time(&self) -> f64;

    /// Short human-readable label, used in logs.
    fn label(&self) -> String;
}

/// Base time state embedded by concrete machines.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    t: f64,
}

impl Clock {
    pub fn set(&mut self, t: f64) {
        self.t = t;
    }

    pub fn get(self) -> f64 {
        self.t
    }
}

pub(crate) fn share<M>(machine: M) -> Shared<M> {
    Rc::new(RefCell::new(machine))
}

/// Read a shared machine from inside a field resolver.
pub(crate) fn read<M: Machine, R>(handle: &Shared<M>, f: impl FnOnce(&M) -> R) -> KinescopeResult<R> {
    let m = handle.try_borrow().map_err(|_| {
        KinescopeError::evaluation("machine is being advanced while a field reads it")
    })?;
    Ok(f(&m))
}
