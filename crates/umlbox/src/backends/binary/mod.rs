//! Binary backend: members read from class-file bytes

mod reader;
mod source;
mod visitor;

pub use reader::{ClassFile, ClassHeader, ClassVisitor, MemberInfo, MAGIC};
pub use source::BinarySource;
pub use visitor::MemberCollector;
