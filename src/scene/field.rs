//! Deferred drawable attributes.
//!
//! A [`Field`] is how a drawable's geometry gets bound either to a fixed value or to live
//! machine state without the scene graph knowing about machines. Fields are re-resolved on
//! every read; nothing is cached, because the machine behind a resolver changes between frames
//! while the drawable holding the field is built once.

use std::fmt;
use std::rc::Rc;

use crate::foundation::error::KinescopeResult;

/// Zero-argument producer of a field value.
pub type Resolver<T> = Rc<dyn Fn() -> KinescopeResult<T>>;

/// Producer of a field value from a fixed argument tuple.
pub type ArgResolver<T> = Rc<dyn Fn(&[f64]) -> KinescopeResult<T>>;

/// How a [`Field`] produces its value. Fixed for the lifetime of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    Constant,
    Resolver,
    ResolverWithArgs,
}

/// A drawable attribute that is either a plain value or computed at draw time.
#[derive(Clone)]
pub enum Field<T> {
    /// Returned unchanged on every read.
    Constant(T),
    /// Invoked on every read.
    Resolver(Resolver<T>),
    /// Invoked with the same `args` on every read.
    ResolverWithArgs {
        resolver: ArgResolver<T>,
        args: Rc<[f64]>,
    },
}

impl<T> Field<T> {
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    pub fn resolver(f: impl Fn() -> KinescopeResult<T> + 'static) -> Self {
        Self::Resolver(Rc::new(f))
    }

    pub fn with_args(
        f: impl Fn(&[f64]) -> KinescopeResult<T> + 'static,
        args: impl Into<Rc<[f64]>>,
    ) -> Self {
        Self::ResolverWithArgs {
            resolver: Rc::new(f),
            args: args.into(),
        }
    }

    pub fn mode(&self) -> FieldMode {
        match self {
            Self::Constant(_) => FieldMode::Constant,
            Self::Resolver(_) => FieldMode::Resolver,
            Self::ResolverWithArgs { .. } => FieldMode::ResolverWithArgs,
        }
    }

    /// Produce the current value. Resolver errors are returned as-is.
    pub fn resolve(&self) -> KinescopeResult<T>
    where
        T: Clone,
    {
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Resolver(f) => f(),
            Self::ResolverWithArgs { resolver, args } => resolver(args),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Self::Constant(value.to_owned())
    }
}

impl<T: fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
            Self::ResolverWithArgs { args, .. } => f
                .debug_struct("ResolverWithArgs")
                .field("args", args)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/field.rs"]
mod tests;
