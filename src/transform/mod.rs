//! Geometry helpers that place source frames inside the render frame.

pub(crate) mod fit;
