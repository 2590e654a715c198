//! Internal-space geometry values.

pub mod point;
pub mod vector;
