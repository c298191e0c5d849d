//! Extraction backends and the facade that drives them
//!
//! Both backends implement [`crate::core::Source`] and differ only in how
//! they gather members. For the same class and configuration they produce
//! identical diagrams.

pub mod binary;
pub mod orchestrator;
pub mod structural;

pub use binary::{BinarySource, ClassFile};
pub use orchestrator::{generate, Input, Orchestrator};
pub use structural::{Ancestor, ClassDescriptor, StructuralSource};
