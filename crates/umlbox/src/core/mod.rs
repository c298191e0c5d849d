//! Core abstractions for diagram generation
//!
//! Visibility, member records, configuration, the formatter hook, the shared
//! extraction contract and the box renderer. Nothing in here knows about
//! class files or type descriptors.

mod access;
mod box_drawing;
mod config;
mod diagram;
mod error;
mod formatter;
pub mod logging;
mod members;
mod source;
pub mod text;

pub use access::*;
pub use box_drawing::*;
pub use config::*;
pub use diagram::*;
pub use error::*;
pub use formatter::*;
pub use logging::*;
pub use members::*;
pub use source::*;
