//! Member collection from a [`ClassDescriptor`]

use tracing::{debug, span, trace, warn, Level};

use super::descriptor::{ClassDescriptor, ExecutableDescriptor};
use crate::core::{
    Access, ClassMembers, Config, FieldData, MethodData, ParameterData, Result, Source,
};
use crate::signature::{anonymous_id, simple_name, JavaType, TypeParameter, TypeRenderer};

/// Reads members straight from resolved type information
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSource;

impl StructuralSource {
    pub fn new() -> Self {
        Self
    }
}

impl Source for StructuralSource {
    type Input = ClassDescriptor;

    fn collect(&self, class: &ClassDescriptor, config: &Config) -> Result<ClassMembers> {
        let span = span!(Level::DEBUG, "collect_structural", class = class.name.as_str());
        let _enter = span.enter();

        let ctor_name = display_name(class);
        let mut class_name = if config.use_fqn() {
            class.name.clone()
        } else {
            ctor_name.clone()
        };
        if config.show_generics() && !class.type_parameters.is_empty() {
            class_name.push('<');
            class_name.push_str(&header_parameters(
                &class.type_parameters,
                config.truncate_generic_bounds(),
            ));
            class_name.push('>');
        }

        let shape = ParameterShape {
            is_enum: class.is_enum(),
            is_member: takes_outer_instance(class),
        };
        let types = TypeRenderer::new(true);
        let mut members = ClassMembers::new(class_name);

        for field in &class.fields {
            if field.is_synthetic() {
                continue;
            }
            let access = Access::from_modifiers(field.modifiers);
            if !config.is_visible(access) {
                continue;
            }
            let ty = match (&field.generic_type, config.show_generics()) {
                (Some(generic), true) => generic,
                _ => &field.ty,
            };
            members
                .fields
                .push(FieldData::new(&field.name, types.render(ty), access));
        }

        for ctor in &class.constructors {
            if ctor.is_synthetic() {
                continue;
            }
            let access = Access::from_modifiers(ctor.modifiers);
            if config.is_visible(access) {
                let params = parameters(ctor, shape, config.show_generics(), &class.name);
                members
                    .constructors
                    .push(MethodData::constructor(&ctor_name, access, params));
            }
        }

        for method in &class.methods {
            if method.is_synthetic() {
                continue;
            }
            let access = Access::from_modifiers(method.modifiers);
            if !config.is_visible(access) {
                continue;
            }
            let return_type = match (&method.generic_return_type, config.show_generics()) {
                (Some(generic), true) => generic,
                _ => &method.return_type,
            };
            let params = parameters(method, shape, config.show_generics(), &class.name);
            members.methods.push(MethodData::method(
                &method.name,
                types.render(return_type),
                access,
                params,
            ));
        }

        debug!(
            class_name = members.class_name.as_str(),
            members = members.member_count(),
            "Collected structural members"
        );
        Ok(members)
    }

    fn name(&self) -> &'static str {
        "structural"
    }
}

/// The name a class goes by in its own box and in its constructors
pub fn display_name(class: &ClassDescriptor) -> String {
    match class.simple_name.as_deref() {
        Some("") => match anonymous_id(&class.name) {
            Some(id) => id.to_string(),
            None => {
                warn!(class = class.name.as_str(), "Anonymous class has no numeric id");
                simple_name(&class.name).to_string()
            }
        },
        // Some generated names keep a `$` even in their simple form
        Some(name) => match name.find('$') {
            Some(idx) => name[idx + 1..].to_string(),
            None => name.to_string(),
        },
        None => simple_name(&class.name).to_string(),
    }
}

/// `T, U extends Comparable<U>` for a class header.
///
/// Each parameter shows its own bounds only. A bound that mentions another
/// parameter names it without repeating that parameter's bounds, which is
/// also how the class-file `Signature` attribute spells it.
pub fn header_parameters(params: &[TypeParameter], truncate_bounds: bool) -> String {
    let renderer = TypeRenderer::new(truncate_bounds);
    params
        .iter()
        .map(|param| renderer.render_declaration(param))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Constructors of inner classes take the enclosing instance first. Local
/// classes compiled inside instance code are named `Outer$1Name` and behave
/// the same way even though they are not member classes.
fn takes_outer_instance(class: &ClassDescriptor) -> bool {
    if class.is_member && !class.is_static() {
        return true;
    }
    if class.is_member {
        return false;
    }
    let Some(enclosing) = class.enclosing.as_deref() else {
        return false;
    };
    let Some(rest) = class.name.strip_prefix(enclosing) else {
        return false;
    };
    let mut chars = rest.chars();
    chars.next() == Some('$') && matches!(chars.next(), Some('1'..='9'))
}

#[derive(Debug, Clone, Copy)]
struct ParameterShape {
    is_enum: bool,
    is_member: bool,
}

impl ParameterShape {
    /// How many implicit leading parameters the resolved types leave out
    fn implicit_count(self) -> usize {
        if self.is_enum {
            2
        } else if self.is_member {
            1
        } else {
            0
        }
    }
}

/// Pair every runtime parameter with its resolved type when one exists.
///
/// When the resolved list is shorter, the implicit leading parameters map to
/// no resolved type and fall back to their erased one. A resolved index past
/// the end disables resolved types for the rest of the member.
fn parameters(
    exec: &ExecutableDescriptor,
    shape: ParameterShape,
    show_generics: bool,
    class_name: &str,
) -> Vec<ParameterData> {
    let types = TypeRenderer::new(true);
    let mut generic = if show_generics {
        exec.generic_parameter_types
            .as_deref()
            .filter(|types| !types.is_empty())
    } else {
        None
    };

    let mut out = Vec::with_capacity(exec.parameters.len());
    for (i, param) in exec.parameters.iter().enumerate() {
        let mut ty: &JavaType = &param.ty;

        if let Some(resolved) = generic {
            let offset = if resolved.len() != exec.parameters.len() {
                shape.implicit_count()
            } else {
                0
            };
            if let Some(index) = i.checked_sub(offset) {
                match resolved.get(index) {
                    Some(found) => ty = found,
                    None => {
                        warn!(
                            class = class_name,
                            member = exec.name.as_str(),
                            index,
                            parameters = exec.parameters.len(),
                            resolved = resolved.len(),
                            is_enum = shape.is_enum,
                            is_member = shape.is_member,
                            "Resolved parameter types do not line up, using erased types"
                        );
                        generic = None;
                    }
                }
            }
        }

        let rendered = types.render(ty);
        trace!(member = exec.name.as_str(), index = i, ty = rendered.as_str(), "Parameter");
        out.push(ParameterData::new(param.name.clone(), rendered));
    }
    out
}
