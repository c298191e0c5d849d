//! Turning [`JavaType`]s into text
//!
//! Two renderings exist:
//!
//! - [`TypeRenderer`] produces display text directly from resolved types.
//! - The `trace_*` functions produce Java-like declaration text with fully
//!   qualified names and bare type variable uses. That text is then
//!   canonicalized by [`super::declaration`], the same way for every
//!   signature string read from a class file.

use super::names::simple_name;
use super::types::{is_trivial_bound, ClassSignature, JavaType, MethodSignature, TypeParameter};

/// Renders resolved types with simple names.
///
/// Type variable uses always render as their bare name. Only a declaration
/// rendered through [`TypeRenderer::render_declaration`] shows bounds, and
/// only its own: `T extends Comparable<U>` never expands `U` further, so
/// self-referential and mutually recursive bounds such as
/// `E extends Enum<E>` terminate.
#[derive(Debug, Clone, Copy)]
pub struct TypeRenderer {
    truncate_bounds: bool,
}

impl TypeRenderer {
    pub fn new(truncate_bounds: bool) -> Self {
        Self { truncate_bounds }
    }

    /// Render a type used in a member position or inside a bound
    pub fn render(&self, ty: &JavaType) -> String {
        match ty {
            JavaType::Primitive(p) => p.keyword().to_string(),
            JavaType::Class(name) => simple_name(name).to_string(),
            JavaType::Parameterized { raw, args, .. } => {
                let mut out = simple_name(raw).to_string();
                if !args.is_empty() {
                    out.push('<');
                    out.push_str(&self.join(args, ", "));
                    out.push('>');
                }
                out
            }
            JavaType::Array(element) => format!("{}[]", self.render(element)),
            JavaType::Wildcard { upper, lower } => {
                if !lower.is_empty() {
                    format!("? super {}", self.join(lower, " & "))
                } else if upper.first().is_some_and(|b| !b.is_object()) {
                    format!("? extends {}", self.join(upper, " & "))
                } else {
                    "?".to_string()
                }
            }
            JavaType::TypeVariable(name) => name.clone(),
        }
    }

    /// Render a declared parameter the way it appears in a class header
    pub fn render_declaration(&self, param: &TypeParameter) -> String {
        if self.truncate_bounds || is_trivial_bound(&param.bounds) {
            return param.name.clone();
        }
        format!("{} extends {}", param.name, self.join(&param.bounds, " & "))
    }

    fn join(&self, types: &[JavaType], separator: &str) -> String {
        types
            .iter()
            .map(|ty| self.render(ty))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Java-like text for a type, with binary names and bare type variables
pub fn trace_type(ty: &JavaType) -> String {
    match ty {
        JavaType::Primitive(p) => p.keyword().to_string(),
        JavaType::Class(name) => name.clone(),
        JavaType::Parameterized { raw, owner, args } => {
            let mut out = match owner {
                Some(owner) => {
                    let inner = raw.rsplit('$').next().unwrap_or(raw.as_str());
                    format!("{}.{}", trace_type(owner), inner)
                }
                None => raw.clone(),
            };
            if !args.is_empty() {
                out.push('<');
                out.push_str(&args.iter().map(trace_type).collect::<Vec<_>>().join(", "));
                out.push('>');
            }
            out
        }
        JavaType::Array(element) => format!("{}[]", trace_type(element)),
        JavaType::TypeVariable(name) => name.clone(),
        JavaType::Wildcard { upper, lower } => {
            if !lower.is_empty() {
                format!("? super {}", join_traced(lower))
            } else if !upper.is_empty() {
                format!("? extends {}", join_traced(upper))
            } else {
                "?".to_string()
            }
        }
    }
}

fn join_traced(types: &[JavaType]) -> String {
    types.iter().map(trace_type).collect::<Vec<_>>().join(" & ")
}

/// `<A, B extends java.lang.Number>`, or an empty string
pub fn trace_type_parameters(params: &[TypeParameter], truncate_bounds: bool) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|p| {
            if truncate_bounds || is_trivial_bound(&p.bounds) {
                p.name.clone()
            } else {
                format!("{} extends {}", p.name, join_traced(&p.bounds))
            }
        })
        .collect();
    format!("<{}>", rendered.join(", "))
}

/// `<T> extends Super implements I1, I2`
pub fn trace_class(sig: &ClassSignature, truncate_bounds: bool) -> String {
    let mut out = trace_type_parameters(&sig.type_parameters, truncate_bounds);
    if !sig.superclass.is_object() {
        out.push_str(" extends ");
        out.push_str(&trace_type(&sig.superclass));
    }
    if !sig.interfaces.is_empty() {
        out.push_str(" implements ");
        out.push_str(&sig.interfaces.iter().map(trace_type).collect::<Vec<_>>().join(", "));
    }
    out
}

/// `<A>(A, java.util.List<A>)`; the return type is traced separately
pub fn trace_method(sig: &MethodSignature) -> String {
    format!(
        "{}({})",
        trace_type_parameters(&sig.type_parameters, false),
        sig.parameters.iter().map(trace_type).collect::<Vec<_>>().join(", ")
    )
}
