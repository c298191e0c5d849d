//! The live type model read by the structural backend
//!
//! A [`ClassDescriptor`] is what a loaded class exposes about itself: its
//! declared members with raw modifier bits, erased types and, when the
//! class carries them, resolved generic types. Collaborators build one in
//! code or hand it over as JSON.

use serde::{Deserialize, Serialize};

use crate::core::{access_flags, Result};
use crate::signature::{JavaType, Primitive, TypeParameter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Binary name, e.g. `java.util.Map$Entry`
    pub name: String,
    /// The language-level simple name; empty for anonymous classes
    #[serde(default)]
    pub simple_name: Option<String>,
    #[serde(default)]
    pub modifiers: u16,
    /// Declared directly inside another class (not local, not anonymous)
    #[serde(default)]
    pub is_member: bool,
    /// Binary name of the immediately enclosing class
    #[serde(default)]
    pub enclosing: Option<String>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub constructors: Vec<ExecutableDescriptor>,
    #[serde(default)]
    pub methods: Vec<ExecutableDescriptor>,
    #[serde(default)]
    pub superclass: Option<Ancestor>,
}

/// The supertype link of a [`ClassDescriptor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ancestor {
    Resolved(Box<ClassDescriptor>),
    /// A supertype that could not be introspected
    Unresolved { name: String },
}

impl Ancestor {
    pub fn name(&self) -> &str {
        match self {
            Ancestor::Resolved(class) => &class.name,
            Ancestor::Unresolved { name } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub modifiers: u16,
    /// Erased type
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default)]
    pub generic_type: Option<JavaType>,
}

/// A constructor or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableDescriptor {
    pub name: String,
    #[serde(default)]
    pub modifiers: u16,
    /// Every runtime parameter, implicit leading ones included
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Resolved parameter types. May omit the implicit leading parameters
    /// of enum and inner-class constructors.
    #[serde(default)]
    pub generic_parameter_types: Option<Vec<JavaType>>,
    #[serde(default = "void")]
    pub return_type: JavaType,
    #[serde(default)]
    pub generic_return_type: Option<JavaType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Present only when the class was compiled with parameter names
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: JavaType,
}

fn void() -> JavaType {
    JavaType::Primitive(Primitive::Void)
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            simple_name: None,
            modifiers: access_flags::PUBLIC,
            is_member: false,
            enclosing: None,
            type_parameters: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            superclass: None,
        }
    }

    pub fn with_simple_name(mut self, simple_name: impl Into<String>) -> Self {
        self.simple_name = Some(simple_name.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: u16) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark as a member class of `enclosing`
    pub fn nested_in(mut self, enclosing: impl Into<String>) -> Self {
        self.enclosing = Some(enclosing.into());
        self.is_member = true;
        self
    }

    /// Mark as a local or anonymous class inside `enclosing`
    pub fn local_to(mut self, enclosing: impl Into<String>) -> Self {
        self.enclosing = Some(enclosing.into());
        self.is_member = false;
        self
    }

    pub fn with_type_parameters(mut self, params: Vec<TypeParameter>) -> Self {
        self.type_parameters = params;
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constructor(mut self, ctor: ExecutableDescriptor) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn with_method(mut self, method: ExecutableDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_superclass(mut self, superclass: ClassDescriptor) -> Self {
        self.superclass = Some(Ancestor::Resolved(Box::new(superclass)));
        self
    }

    pub fn with_unresolved_superclass(mut self, name: impl Into<String>) -> Self {
        self.superclass = Some(Ancestor::Unresolved { name: name.into() });
        self
    }

    pub fn is_enum(&self) -> bool {
        self.modifiers & access_flags::ENUM != 0
    }

    pub fn is_static(&self) -> bool {
        self.modifiers & access_flags::STATIC != 0
    }

    pub fn is_universal_base(&self) -> bool {
        self.name == crate::signature::UNIVERSAL_BASE
    }

    /// Read a descriptor handed over as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `java.lang.Object` with no members, the usual root of a chain
    pub fn universal_base() -> Self {
        Self::new(crate::signature::UNIVERSAL_BASE)
            .with_simple_name("Object")
            .with_constructor(ExecutableDescriptor::constructor(
                crate::signature::UNIVERSAL_BASE,
                access_flags::PUBLIC,
            ))
    }
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, modifiers: u16, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            modifiers,
            ty,
            generic_type: None,
        }
    }

    pub fn with_generic_type(mut self, ty: JavaType) -> Self {
        self.generic_type = Some(ty);
        self
    }

    pub fn is_synthetic(&self) -> bool {
        self.modifiers & access_flags::SYNTHETIC != 0
    }
}

impl ExecutableDescriptor {
    pub fn method(name: impl Into<String>, modifiers: u16, return_type: JavaType) -> Self {
        Self {
            name: name.into(),
            modifiers,
            parameters: Vec::new(),
            generic_parameter_types: None,
            return_type,
            generic_return_type: None,
        }
    }

    /// Constructors are named after the binary name of their class
    pub fn constructor(class_name: impl Into<String>, modifiers: u16) -> Self {
        Self::method(class_name, modifiers, void())
    }

    pub fn with_parameter(mut self, ty: JavaType) -> Self {
        self.parameters.push(ParameterDescriptor { name: None, ty });
        self
    }

    pub fn with_named_parameter(mut self, name: impl Into<String>, ty: JavaType) -> Self {
        self.parameters.push(ParameterDescriptor {
            name: Some(name.into()),
            ty,
        });
        self
    }

    pub fn with_generic_parameter_types(mut self, types: Vec<JavaType>) -> Self {
        self.generic_parameter_types = Some(types);
        self
    }

    pub fn with_generic_return_type(mut self, ty: JavaType) -> Self {
        self.generic_return_type = Some(ty);
        self
    }

    pub fn is_synthetic(&self) -> bool {
        self.modifiers & access_flags::SYNTHETIC != 0
    }
}
