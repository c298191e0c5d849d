//! Member records collected from a class
//!
//! Each record has a plain rendering (its `Display` impl), used for width
//! calculation, and a formatted rendering that routes every token through a
//! [`Formatter`]. Both share the same punctuation skeleton.

use std::cmp::Ordering;
use std::fmt;

use super::{Access, Formatter};

/// A method or constructor parameter. The name is only known when the
/// class carries parameter metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterData {
    pub name: Option<String>,
    pub type_name: String,
}

impl ParameterData {
    pub fn new(name: Option<String>, type_name: impl Into<String>) -> Self {
        Self {
            name,
            type_name: type_name.into(),
        }
    }

    pub fn unnamed(type_name: impl Into<String>) -> Self {
        Self::new(None, type_name)
    }

    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(Some(name.into()), type_name)
    }

    pub fn formatted(&self, f: &dyn Formatter) -> String {
        match &self.name {
            Some(name) => format!("{}: {}", f.parameter_name(name), f.type_name(&self.type_name)),
            None => f.type_name(&self.type_name),
        }
    }
}

impl fmt::Display for ParameterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// Named parameters order by name then type. A named parameter sorts
/// before a nameless one whatever the types, which keeps the order total
/// and consistent with `Eq` when the two kinds meet.
impl Ord for ParameterData {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a.cmp(b).then_with(|| self.type_name.cmp(&other.type_name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.type_name.cmp(&other.type_name),
        }
    }
}

impl PartialOrd for ParameterData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldData {
    pub name: String,
    pub type_name: String,
    pub access: Access,
}

impl FieldData {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, access: Access) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            access,
        }
    }

    pub fn formatted(&self, f: &dyn Formatter) -> String {
        format!(
            "{} {}: {}",
            f.access(self.access),
            f.field_name(&self.name),
            f.type_name(&self.type_name)
        )
    }
}

impl fmt::Display for FieldData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.access.glyph(), self.name, self.type_name)
    }
}

/// Fields order by name. Type and access only break ties between
/// otherwise equal names, which keeps the order consistent with `Eq`.
impl Ord for FieldData {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.type_name.cmp(&other.type_name))
            .then_with(|| self.access.cmp(&other.access))
    }
}

impl PartialOrd for FieldData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A method or constructor.
///
/// Constructors carry the class's simple name and a `void` return type
/// that is never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodData {
    pub name: String,
    pub return_type: String,
    pub access: Access,
    pub is_constructor: bool,
    pub params: Vec<ParameterData>,
}

impl MethodData {
    pub fn method(
        name: impl Into<String>,
        return_type: impl Into<String>,
        access: Access,
        params: Vec<ParameterData>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            access,
            is_constructor: false,
            params,
        }
    }

    pub fn constructor(name: impl Into<String>, access: Access, params: Vec<ParameterData>) -> Self {
        Self {
            name: name.into(),
            return_type: "void".to_string(),
            access,
            is_constructor: true,
            params,
        }
    }

    pub fn formatted(&self, f: &dyn Formatter) -> String {
        let params = self
            .params
            .iter()
            .map(|p| p.formatted(f))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("{} {}({})", f.access(self.access), f.method_name(&self.name), params);
        if !self.is_constructor {
            out.push_str(": ");
            out.push_str(&f.type_name(&self.return_type));
        }
        out
    }
}

impl fmt::Display for MethodData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.access.glyph(), self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")?;
        if !self.is_constructor {
            write!(f, ": {}", self.return_type)?;
        }
        Ok(())
    }
}

/// Name, then parameters element-wise (a strict prefix sorts first), then
/// return type, then access rank.
///
/// The access tie-break is intentional: some real classes declare
/// non-synthetic methods that differ only in visibility, and both rows are
/// kept. `is_constructor` only separates records that agree on everything
/// else.
impl Ord for MethodData {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.params.cmp(&other.params))
            .then_with(|| self.return_type.cmp(&other.return_type))
            .then_with(|| self.access.cmp(&other.access))
            .then_with(|| self.is_constructor.cmp(&other.is_constructor))
    }
}

impl PartialOrd for MethodData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
