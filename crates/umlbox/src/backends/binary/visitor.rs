//! Turning visited class-file entries into member records

use tracing::{debug, warn};

use super::reader::{ClassHeader, ClassVisitor, MemberInfo};
use crate::core::{
    access_flags, Access, ClassMembers, Config, DiagramError, FieldData, MethodData, Result,
};
use crate::signature::{
    parse_class_signature, parse_field_descriptor, parse_field_signature, parse_method_descriptor,
    parse_method_signature, reconcile, simple_name, DecodedSignature,
};

const CONSTRUCTOR: &str = "<init>";
const STATIC_INITIALIZER: &str = "<clinit>";
const LAMBDA_MARKER: &str = "lambda$";

/// Collects the visible members of one class as it is visited
#[derive(Debug)]
pub struct MemberCollector<'c> {
    config: &'c Config,
    binary_name: String,
    constructor_name: String,
    members: ClassMembers,
}

impl<'c> MemberCollector<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            binary_name: String::new(),
            constructor_name: String::new(),
            members: ClassMembers::default(),
        }
    }

    pub fn finish(self) -> ClassMembers {
        self.members
    }

    fn field_type(&self, field: &MemberInfo) -> Result<String> {
        let erased = parse_field_descriptor(&field.descriptor)
            .map_err(|err| self.bad_descriptor(field, err))?;
        let descriptor = DecodedSignature::from_field_descriptor(&erased);

        let decoded = match self.signature_of(field) {
            Some(signature) => match parse_field_signature(signature) {
                Ok(ty) => reconcile(&descriptor, DecodedSignature::from_field_signature(&ty)),
                Err(err) => {
                    self.signature_fallback(field, &err);
                    descriptor
                }
            },
            None => descriptor,
        };
        Ok(decoded.declaration.into_iter().next().unwrap_or_default())
    }

    fn method_signature(&self, method: &MemberInfo) -> Result<DecodedSignature> {
        let erased = parse_method_descriptor(&method.descriptor)
            .map_err(|err| self.bad_descriptor(method, err))?;
        let descriptor = DecodedSignature::from_method_descriptor(&erased);

        Ok(match self.signature_of(method) {
            Some(signature) => match parse_method_signature(signature) {
                Ok(sig) => reconcile(&descriptor, DecodedSignature::from_method_signature(&sig)),
                Err(err) => {
                    self.signature_fallback(method, &err);
                    descriptor
                }
            },
            None => descriptor,
        })
    }

    /// The generic signature, unless generics are switched off
    fn signature_of<'m>(&self, member: &'m MemberInfo) -> Option<&'m str> {
        if self.config.show_generics() {
            member.signature.as_deref()
        } else {
            None
        }
    }

    fn signature_fallback(&self, member: &MemberInfo, err: &DiagramError) {
        warn!(
            class = self.binary_name.as_str(),
            member = member.name.as_str(),
            error = %err,
            "Unreadable generic signature, using the descriptor"
        );
    }

    fn bad_descriptor(&self, member: &MemberInfo, err: DiagramError) -> DiagramError {
        DiagramError::class_format(
            format!(
                "{}.{} has an invalid descriptor: {}",
                self.binary_name, member.name, err
            ),
            0,
        )
    }
}

impl ClassVisitor for MemberCollector<'_> {
    fn visit_class(&mut self, header: &ClassHeader) -> Result<()> {
        self.binary_name = header.binary_name();
        self.constructor_name = simple_name(&self.binary_name).to_string();

        let mut class_name = if self.config.use_fqn() {
            self.binary_name.clone()
        } else {
            self.constructor_name.clone()
        };

        let signature = header
            .signature
            .as_deref()
            .filter(|_| self.config.show_generics());
        if let Some(signature) = signature {
            match parse_class_signature(signature) {
                Ok(sig) => {
                    let decoded = DecodedSignature::from_class_signature(
                        &sig,
                        self.config.truncate_generic_bounds(),
                    );
                    if let Some(generic) = decoded.generic {
                        class_name.push('<');
                        class_name.push_str(&generic);
                        class_name.push('>');
                    }
                }
                Err(err) => warn!(
                    class = self.binary_name.as_str(),
                    error = %err,
                    "Unreadable class signature, header shown without type parameters"
                ),
            }
        }

        self.members.class_name = class_name;
        Ok(())
    }

    fn visit_field(&mut self, field: &MemberInfo) -> Result<()> {
        if field.access & access_flags::SYNTHETIC != 0 {
            return Ok(());
        }
        let access = Access::from_modifiers(field.access);
        if !self.config.is_visible(access) {
            return Ok(());
        }

        let type_name = self.field_type(field)?;
        self.members
            .fields
            .push(FieldData::new(&field.name, type_name, access));
        Ok(())
    }

    fn visit_method(&mut self, method: &MemberInfo) -> Result<()> {
        if method.access & access_flags::SYNTHETIC != 0 {
            return Ok(());
        }
        if method.name.contains(LAMBDA_MARKER) || method.name == STATIC_INITIALIZER {
            return Ok(());
        }
        let access = Access::from_modifiers(method.access);
        if !self.config.is_visible(access) {
            return Ok(());
        }

        let decoded = self.method_signature(method)?;
        let mut params = decoded.to_parameters();
        if let Some(names) = &method.parameter_names {
            for (param, name) in params.iter_mut().zip(names) {
                if let Some(name) = name {
                    param.name = Some(name.clone());
                }
            }
        }

        if method.name == CONSTRUCTOR {
            self.members.constructors.push(MethodData::constructor(
                &self.constructor_name,
                access,
                params,
            ));
        } else {
            let return_type = decoded.return_type.unwrap_or_default();
            self.members
                .methods
                .push(MethodData::method(&method.name, return_type, access, params));
        }
        Ok(())
    }

    fn visit_end(&mut self) -> Result<()> {
        debug!(
            class_name = self.members.class_name.as_str(),
            members = self.members.member_count(),
            "Collected binary members"
        );
        Ok(())
    }
}
