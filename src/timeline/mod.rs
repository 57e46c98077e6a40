//! Track slots, the shared placement walk, and the merged-timeline builder.

pub(crate) mod builder;
pub(crate) mod placement;
pub(crate) mod slot;
