//! Top-level composition entry points and the result they produce.

pub(crate) mod engine;
pub(crate) mod result;
