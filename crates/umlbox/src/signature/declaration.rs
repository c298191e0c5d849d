//! Canonicalizing declaration text read from class files
//!
//! Traced signatures carry binary names, instance-inner qualifiers and
//! explicit `Object` bounds. The helpers here reduce that text to the
//! display convention, split it into its parts, and reconcile it with the
//! erased descriptor of the same member.

use super::names::{is_name_char, simple_name};
use super::render::{trace_class, trace_method, trace_type, TypeRenderer};
use super::types::{ClassSignature, JavaType, MethodDescriptor, MethodSignature};
use crate::core::ParameterData;

/// Reduce traced text to display form: collapse `Outer<..>.Inner`, shorten
/// qualified names, and drop `extends Object` bounds.
pub fn canonicalize(text: &str) -> String {
    let collapsed = collapse_inner_qualifiers(text);
    let simple = strip_qualifiers(&collapsed);
    drop_object_bounds(&simple)
}

/// `Map<K, V>.Entry<K, V>` -> `Entry<K, V>`, at any nesting depth
pub fn collapse_inner_qualifiers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Start offsets (in `out`) of the names owning each open `<`
    let mut owners: Vec<usize> = Vec::new();
    let mut name_start = 0;
    let mut closed_owner: Option<usize> = None;
    let mut in_name = false;

    for c in text.chars() {
        match c {
            '<' => {
                owners.push(name_start);
                out.push(c);
                in_name = false;
                closed_owner = None;
            }
            '>' => {
                closed_owner = owners.pop();
                out.push(c);
                in_name = false;
            }
            '.' if closed_owner.is_some() => {
                if let Some(start) = closed_owner.take() {
                    out.truncate(start);
                }
                name_start = out.len();
                in_name = true;
            }
            c if is_name_char(c) => {
                if !in_name {
                    name_start = out.len();
                    in_name = true;
                }
                out.push(c);
                closed_owner = None;
            }
            _ => {
                out.push(c);
                in_name = false;
                closed_owner = None;
            }
        }
    }
    out
}

/// Replace every qualified name token with its simple name
pub fn strip_qualifiers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();
    for c in text.chars() {
        if is_name_char(c) {
            token.push(c);
        } else {
            if !token.is_empty() {
                out.push_str(simple_name(&token));
                token.clear();
            }
            out.push(c);
        }
    }
    if !token.is_empty() {
        out.push_str(simple_name(&token));
    }
    out
}

/// `? extends Object` -> `?` and `T extends Object` -> `T`. An `Object`
/// bound followed by more bounds or an array suffix is kept.
pub fn drop_object_bounds(text: &str) -> String {
    const BOUND: &str = " extends Object";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(BOUND) {
        let after = &rest[idx + BOUND.len()..];
        out.push_str(&rest[..idx]);
        let at_boundary = matches!(after.chars().next(), None | Some(',' | '>' | ')'));
        if !at_boundary {
            out.push_str(BOUND);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Drop the `extends ` some traced class declarations start with
pub fn strip_leading_extends(text: &str) -> &str {
    let trimmed = text.trim_start();
    trimmed.strip_prefix("extends ").unwrap_or(trimmed)
}

/// Split a leading `<...>` clause off a declaration.
///
/// Returns the clause's contents and the trimmed remainder. Text without a
/// balanced leading clause comes back whole.
pub fn extract_generic_clause(text: &str) -> (Option<&str>, &str) {
    if !text.starts_with('<') {
        return (None, text);
    }
    match matching_close(text, '<', '>') {
        Some(end) => (Some(&text[1..end]), text[end + 1..].trim_start()),
        None => (None, text),
    }
}

/// Split a parameter list on commas that are not inside `<...>`
pub fn split_params(list: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in list.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                params.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let last = current.trim();
    if !last.is_empty() || !params.is_empty() {
        params.push(last.to_string());
    }
    params
}

fn matching_close(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// A member or class declaration after canonicalization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedSignature {
    /// Contents of the leading `<...>` clause, if any
    pub generic: Option<String>,
    /// Parameter types for methods, the single type for fields
    pub declaration: Vec<String>,
    /// Present for methods only
    pub return_type: Option<String>,
}

impl DecodedSignature {
    /// Clean a traced declaration such as `<A>(A, java.util.List<A>)`
    pub fn from_declaration(text: &str) -> Self {
        let canonical = canonicalize(text);
        let (generic, rest) = extract_generic_clause(strip_leading_extends(&canonical));

        let declaration = if let Some(inner) = rest.strip_prefix('(') {
            let inner = match matching_close(rest, '(', ')') {
                Some(end) => &rest[1..end],
                None => inner,
            };
            split_params(inner)
        } else if rest.is_empty() {
            Vec::new()
        } else {
            vec![rest.to_string()]
        };

        Self {
            generic: generic.map(str::to_string),
            declaration,
            return_type: None,
        }
    }

    pub fn from_field_descriptor(ty: &JavaType) -> Self {
        Self {
            generic: None,
            declaration: vec![erased(ty)],
            return_type: None,
        }
    }

    pub fn from_method_descriptor(desc: &MethodDescriptor) -> Self {
        Self {
            generic: None,
            declaration: desc.parameters.iter().map(erased).collect(),
            return_type: Some(erased(&desc.return_type)),
        }
    }

    pub fn from_field_signature(ty: &JavaType) -> Self {
        Self::from_declaration(&trace_type(ty))
    }

    pub fn from_method_signature(sig: &MethodSignature) -> Self {
        Self {
            return_type: Some(canonicalize(&trace_type(&sig.return_type))),
            ..Self::from_declaration(&trace_method(sig))
        }
    }

    pub fn from_class_signature(sig: &ClassSignature, truncate_bounds: bool) -> Self {
        Self::from_declaration(&trace_class(sig, truncate_bounds))
    }

    pub fn is_method(&self) -> bool {
        self.return_type.is_some()
    }

    /// Nameless parameters, one per declared type
    pub fn to_parameters(&self) -> Vec<ParameterData> {
        self.declaration
            .iter()
            .map(|ty| ParameterData::unnamed(ty.clone()))
            .collect()
    }
}

fn erased(ty: &JavaType) -> String {
    TypeRenderer::new(true).render(ty)
}

/// Merge a decoded signature with the descriptor of the same member.
///
/// The signature wins, except where it is known to be incomplete:
/// - leading parameters it omits (enum name/ordinal, outer instance) are
///   taken from the descriptor,
/// - an array suffix it lost is put back,
/// - a missing return type is taken from the descriptor.
pub fn reconcile(descriptor: &DecodedSignature, signature: DecodedSignature) -> DecodedSignature {
    let mut merged = signature;

    let wanted = descriptor.declaration.len();
    if merged.declaration.len() < wanted {
        let missing = wanted - merged.declaration.len();
        let mut padded = descriptor.declaration[..missing].to_vec();
        padded.append(&mut merged.declaration);
        merged.declaration = padded;
    }

    for (erased, decoded) in descriptor.declaration.iter().zip(merged.declaration.iter_mut()) {
        if erased.ends_with("[]") && !decoded.ends_with("[]") {
            decoded.push_str("[]");
        }
    }

    let descriptor_return = descriptor.return_type.as_deref().filter(|r| !r.is_empty());
    let signature_return_missing = merged.return_type.as_deref().map_or(true, str::is_empty);
    if let (Some(ret), true) = (descriptor_return, signature_return_missing) {
        merged.return_type = Some(ret.to_string());
    }

    merged
}
