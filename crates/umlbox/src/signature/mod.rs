//! Java type model, signature grammar and type rendering

pub mod declaration;
pub mod names;
pub mod parser;
pub mod render;
mod types;

pub use declaration::{canonicalize, reconcile, DecodedSignature};
pub use names::{anonymous_id, simple_name};
pub use parser::{
    parse_class_signature, parse_field_descriptor, parse_field_signature, parse_method_descriptor,
    parse_method_signature,
};
pub use render::TypeRenderer;
pub use types::*;
