//! Declarative render instructions: the partitioned main timeline, the picture-in-picture
//! overlay, and the two-clip composite.

pub(crate) mod composite;
pub(crate) mod instruction;
pub(crate) mod overlay;
pub(crate) mod partition;
