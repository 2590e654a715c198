//! Frame sequence consumers.

pub mod sink;
