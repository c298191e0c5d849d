//! Structural backend: members read from a live type descriptor

mod descriptor;
mod source;

pub use descriptor::*;
pub use source::{display_name, header_parameters, StructuralSource};
