//! Source clip metadata and the inspection seam that supplies it.

pub(crate) mod clip;
pub(crate) mod inspect;
