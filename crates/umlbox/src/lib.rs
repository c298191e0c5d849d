//! umlbox - text UML boxes for Java classes
//!
//! Draws a class's visible members as a box of box-drawing characters. A
//! class can be read two ways, and both give the same text:
//!
//! - from a [`ClassDescriptor`], the structural view of an already loaded
//!   type (built in code or deserialized from JSON),
//! - from class-file bytes, read directly with generic signatures
//!   reconciled against erased descriptors.
//!
//! # Quick Start
//!
//! ```rust
//! use umlbox::prelude::*;
//! use umlbox::access_flags::{PRIVATE, PUBLIC};
//!
//! let double = JavaType::Primitive(Primitive::Double);
//! let class = ClassDescriptor::new("shapes.Rectangle")
//!     .with_field(FieldDescriptor::new("width", PRIVATE, double.clone()))
//!     .with_method(ExecutableDescriptor::method("getWidth", PUBLIC, double));
//!
//! let config = Config::new().with_all_visible();
//! let text = umlbox::generate_structural(&config, &class).unwrap().to_string();
//! assert!(text.contains("│ - width: double      │"));
//! assert!(text.contains("│ + getWidth(): double │"));
//! ```
//!
//! Ancestors are chained above the class when superclasses are included;
//! see [`backends::Orchestrator`].

pub mod backends;
pub mod core;
pub mod signature;

pub use backends::{
    generate, Ancestor, BinarySource, ClassDescriptor, ClassFile, Input, Orchestrator,
    StructuralSource,
};
pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backends::structural::{
        ClassDescriptor, ExecutableDescriptor, FieldDescriptor, ParameterDescriptor,
    };
    pub use crate::backends::{Input, Orchestrator};
    pub use crate::core::{
        Access, ChainedDiagram, Config, Diagram, DiagramError, Formatter, HtmlFormatter, Line,
        PlainFormatter, Rendered, Source, VisibilitySet,
    };
    pub use crate::signature::{JavaType, Primitive, TypeParameter};
}

/// Draw a loaded type, with its ancestors when the configuration asks
pub fn generate_structural(config: &Config, class: &ClassDescriptor) -> Result<Rendered> {
    generate(config, Input::Descriptor(class))
}

/// Draw a class from its class-file bytes. `ancestors` are the bytes of its
/// superclasses, root first, and are only used when superclasses are included.
pub fn generate_binary(config: &Config, class: &[u8], ancestors: &[&[u8]]) -> Result<Rendered> {
    generate(config, Input::Bytes { class, ancestors })
}

/// Draw a class file with the default configuration
pub fn render_class_file(bytes: &[u8]) -> anyhow::Result<String> {
    let rendered = generate_binary(&Config::default(), bytes, &[])?;
    Ok(rendered.to_string())
}
