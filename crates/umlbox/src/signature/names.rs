//! Class name simplification

/// Shorten a binary class name for display.
///
/// Nested names keep the part after the last `$`; a local class's mangled
/// form (`1FontLazyValue`) loses its numeric prefix, while an anonymous
/// class keeps its bare number. Other names keep the part after the last `.`.
pub fn simple_name(binary_name: &str) -> &str {
    match binary_name.rfind('$') {
        Some(idx) => {
            let tail = &binary_name[idx + 1..];
            unwrap_local_class(tail).unwrap_or(tail)
        }
        None => match binary_name.rfind('.') {
            Some(idx) => &binary_name[idx + 1..],
            None => binary_name,
        },
    }
}

/// `1Local` -> `Local`. Only matches digits followed by a valid identifier.
fn unwrap_local_class(segment: &str) -> Option<&str> {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &segment[digits..];
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(rest)
    } else {
        None
    }
}

/// The numeric id of an anonymous class (`Outer$12` -> `12`)
pub fn anonymous_id(binary_name: &str) -> Option<&str> {
    let idx = binary_name.rfind('$')?;
    let tail = &binary_name[idx + 1..];
    if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
        Some(tail)
    } else {
        None
    }
}

/// `java/util/Map$Entry` -> `java.util.Map$Entry`
pub fn internal_to_binary(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}

/// Characters that can appear inside a qualified name token
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}
