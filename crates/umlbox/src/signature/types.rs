//! The type model shared by both backends
//!
//! Class names are binary names with dots (`java.util.Map$Entry`), the
//! same form `Class::getName` reports.

use serde::{Deserialize, Serialize};

pub const UNIVERSAL_BASE: &str = "java.lang.Object";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Void => "void",
        }
    }

    /// The descriptor letter
    pub fn descriptor(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
            Primitive::Void => 'V',
        }
    }
}

/// A Java type, erased or generic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JavaType {
    Primitive(Primitive),
    /// A class or interface without type arguments
    Class(String),
    /// `raw<args>`. `owner` is the enclosing type when that type is itself
    /// parameterized (`Outer<T>.Inner`); `args` may then be empty.
    Parameterized {
        raw: String,
        #[serde(default)]
        owner: Option<Box<JavaType>>,
        #[serde(default)]
        args: Vec<JavaType>,
    },
    Array(Box<JavaType>),
    /// A use of a type variable. Bounds live on the declaring [`TypeParameter`].
    TypeVariable(String),
    Wildcard {
        #[serde(default)]
        upper: Vec<JavaType>,
        #[serde(default)]
        lower: Vec<JavaType>,
    },
}

impl JavaType {
    pub fn class(name: impl Into<String>) -> Self {
        JavaType::Class(name.into())
    }

    pub fn object() -> Self {
        JavaType::Class(UNIVERSAL_BASE.to_string())
    }

    pub fn parameterized(raw: impl Into<String>, args: Vec<JavaType>) -> Self {
        JavaType::Parameterized {
            raw: raw.into(),
            owner: None,
            args,
        }
    }

    pub fn array_of(element: JavaType) -> Self {
        JavaType::Array(Box::new(element))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        JavaType::TypeVariable(name.into())
    }

    /// `?`
    pub fn wildcard() -> Self {
        JavaType::Wildcard {
            upper: Vec::new(),
            lower: Vec::new(),
        }
    }

    /// `? extends bound`
    pub fn extends(bound: JavaType) -> Self {
        JavaType::Wildcard {
            upper: vec![bound],
            lower: Vec::new(),
        }
    }

    /// `? super bound`
    pub fn super_of(bound: JavaType) -> Self {
        JavaType::Wildcard {
            upper: Vec::new(),
            lower: vec![bound],
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JavaType::Class(name) if name == UNIVERSAL_BASE)
    }
}

/// True for a bound list that says nothing: empty, or exactly `Object`.
pub fn is_trivial_bound(bounds: &[JavaType]) -> bool {
    match bounds {
        [] => true,
        [only] => only.is_object(),
        _ => false,
    }
}

/// A declared type parameter such as `T extends Comparable<T>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<JavaType>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>, bounds: Vec<JavaType>) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// `<T> extends Super implements I1, I2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub superclass: JavaType,
    pub interfaces: Vec<JavaType>,
}

/// `<T> (params) return throws`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<JavaType>,
    pub return_type: JavaType,
    pub throws: Vec<JavaType>,
}

/// An erased method descriptor such as `(ILjava/lang/String;)V`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub parameters: Vec<JavaType>,
    pub return_type: JavaType,
}
