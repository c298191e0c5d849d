//! Descriptor and generic signature grammar
//!
//! Covers the JVM field/method descriptor grammar and the class, method and
//! field signature grammar carried by `Signature` attributes.

use chumsky::prelude::*;

use super::names::internal_to_binary;
use super::types::{
    ClassSignature, JavaType, MethodDescriptor, MethodSignature, Primitive, TypeParameter,
};
use crate::core::{DiagramError, Result};

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Parse a field descriptor such as `[Ljava/lang/String;`
pub fn parse_field_descriptor(input: &str) -> Result<JavaType> {
    run(java_type().then_ignore(end()), input)
}

/// Parse a method descriptor such as `(ID)Ljava/lang/String;`
pub fn parse_method_descriptor(input: &str) -> Result<MethodDescriptor> {
    let parser = parameter_list()
        .then(return_type())
        .then_ignore(end())
        .map(|(parameters, return_type)| MethodDescriptor {
            parameters,
            return_type,
        });
    run(parser, input)
}

/// Parse a field signature such as `Ljava/util/List<TT;>;`
pub fn parse_field_signature(input: &str) -> Result<JavaType> {
    run(reference_type().then_ignore(end()), input)
}

/// Parse a method signature such as `<A:Ljava/lang/Object;>(TA;)V`
pub fn parse_method_signature(input: &str) -> Result<MethodSignature> {
    let parser = type_parameters()
        .then(parameter_list())
        .then(return_type())
        .then(
            just('^')
                .ignore_then(reference_type())
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
        .map(
            |(((type_parameters, parameters), return_type), throws)| MethodSignature {
                type_parameters,
                parameters,
                return_type,
                throws,
            },
        );
    run(parser, input)
}

/// Parse a class signature such as `<E:Ljava/lang/Object;>Ljava/util/AbstractList<TE;>;`
pub fn parse_class_signature(input: &str) -> Result<ClassSignature> {
    let parser = type_parameters()
        .then(reference_type())
        .then(reference_type().repeated().collect::<Vec<_>>())
        .then_ignore(end())
        .map(|((type_parameters, superclass), interfaces)| ClassSignature {
            type_parameters,
            superclass,
            interfaces,
        });
    run(parser, input)
}

fn run<'src, T>(parser: impl Parser<'src, &'src str, T, Extra<'src>>, input: &'src str) -> Result<T> {
    parser.parse(input).into_result().map_err(|errors| {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        DiagramError::signature(message, input)
    })
}

/// A simple name: no package separators or signature punctuation
fn identifier<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
    none_of(".;[/<>:").repeated().at_least(1).to_slice()
}

/// A package-qualified internal name, converted to a binary name
fn class_path<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    none_of(".;[<>:")
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|path: &str| internal_to_binary(path))
}

fn primitive<'src>() -> impl Parser<'src, &'src str, Primitive, Extra<'src>> + Clone {
    choice((
        just('Z').to(Primitive::Boolean),
        just('B').to(Primitive::Byte),
        just('C').to(Primitive::Char),
        just('S').to(Primitive::Short),
        just('I').to(Primitive::Int),
        just('J').to(Primitive::Long),
        just('F').to(Primitive::Float),
        just('D').to(Primitive::Double),
    ))
}

fn reference_type<'src>() -> impl Parser<'src, &'src str, JavaType, Extra<'src>> + Clone {
    recursive(|reference| {
        let type_argument = choice((
            just('*').to(JavaType::wildcard()),
            just('+').ignore_then(reference.clone()).map(JavaType::extends),
            just('-').ignore_then(reference.clone()).map(JavaType::super_of),
            reference.clone(),
        ));

        let type_arguments = type_argument
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just('<'), just('>'))
            .or_not()
            .map(Option::unwrap_or_default);

        let class_type = just('L')
            .ignore_then(class_path().then(type_arguments.clone()))
            .then(
                just('.')
                    .ignore_then(identifier().then(type_arguments))
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(just(';'))
            .map(|(outer, inner)| build_class_type(outer, inner));

        let type_variable = just('T')
            .ignore_then(identifier())
            .then_ignore(just(';'))
            .map(|name: &str| JavaType::variable(name));

        let array = just('[')
            .ignore_then(primitive().map(JavaType::Primitive).or(reference))
            .map(JavaType::array_of);

        choice((class_type, type_variable, array))
    })
}

fn java_type<'src>() -> impl Parser<'src, &'src str, JavaType, Extra<'src>> + Clone {
    primitive().map(JavaType::Primitive).or(reference_type())
}

fn return_type<'src>() -> impl Parser<'src, &'src str, JavaType, Extra<'src>> + Clone {
    just('V')
        .to(JavaType::Primitive(Primitive::Void))
        .or(java_type())
}

fn parameter_list<'src>() -> impl Parser<'src, &'src str, Vec<JavaType>, Extra<'src>> + Clone {
    java_type()
        .repeated()
        .collect::<Vec<_>>()
        .delimited_by(just('('), just(')'))
}

/// `<T:class-bound:interface-bound...>`, or nothing
fn type_parameters<'src>() -> impl Parser<'src, &'src str, Vec<TypeParameter>, Extra<'src>> + Clone {
    identifier()
        .then(just(':').ignore_then(reference_type().or_not()))
        .then(
            just(':')
                .ignore_then(reference_type())
                .repeated()
                .collect::<Vec<_>>(),
        )
        .map(|((name, class_bound), interface_bounds)| TypeParameter {
            name: name.to_string(),
            bounds: class_bound.into_iter().chain(interface_bounds).collect(),
        })
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .delimited_by(just('<'), just('>'))
        .or_not()
        .map(Option::unwrap_or_default)
}

/// Fold `Outer<A>.Inner<B>` segments into one type. An inner segment keeps
/// its owner only when something up the chain has type arguments.
fn build_class_type(
    (outer, outer_args): (String, Vec<JavaType>),
    inner: Vec<(&str, Vec<JavaType>)>,
) -> JavaType {
    let mut raw = outer;
    let mut current = if outer_args.is_empty() {
        JavaType::Class(raw.clone())
    } else {
        JavaType::Parameterized {
            raw: raw.clone(),
            owner: None,
            args: outer_args,
        }
    };

    for (name, args) in inner {
        raw = format!("{}${}", raw, name);
        let owner = match current {
            parameterized @ JavaType::Parameterized { .. } => Some(Box::new(parameterized)),
            _ => None,
        };
        current = if args.is_empty() && owner.is_none() {
            JavaType::Class(raw.clone())
        } else {
            JavaType::Parameterized {
                raw: raw.clone(),
                owner,
                args,
            }
        };
    }

    current
}
