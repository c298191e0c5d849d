//! Property-based invariant tests for member ordering and box layout.
//!
//! 1. Member orderings are total and agree with equality.
//! 2. Every row of a rendered box has the same width.
//! 3. The header is centred, with any odd column on the right.
//! 4. With generics off, no type arguments or bounds appear.
//! 5. Chained boxes are centred on the chain's midpoint.

use std::cmp::Ordering;

use proptest::prelude::*;
use umlbox::prelude::*;
use umlbox::{generate_structural, FieldData, MethodData, ParameterData};

// ── Helpers ─────────────────────────────────────────────────────────────

fn access() -> impl Strategy<Value = Access> {
    prop_oneof![
        Just(Access::Public),
        Just(Access::Protected),
        Just(Access::PackagePrivate),
        Just(Access::Private),
    ]
}

fn modifiers() -> impl Strategy<Value = u16> {
    prop_oneof![Just(0x0001u16), Just(0x0002), Just(0x0004), Just(0x0000)]
}

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}"
}

fn small_name() -> impl Strategy<Value = String> {
    prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("ab".to_string())]
}

fn type_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int".to_string()),
        Just("String".to_string()),
        Just("List<T>".to_string()),
    ]
}

fn parameter() -> impl Strategy<Value = ParameterData> {
    (proptest::option::of(small_name()), type_text())
        .prop_map(|(name, ty)| ParameterData::new(name, ty))
}

fn method() -> impl Strategy<Value = MethodData> {
    (
        small_name(),
        proptest::collection::vec(parameter(), 0..3),
        type_text(),
        access(),
        any::<bool>(),
    )
        .prop_map(|(name, params, ret, access, is_ctor)| {
            if is_ctor {
                MethodData::constructor(name, access, params)
            } else {
                MethodData::method(name, ret, access, params)
            }
        })
}

fn field() -> impl Strategy<Value = FieldData> {
    (small_name(), type_text(), access()).prop_map(|(n, t, a)| FieldData::new(n, t, a))
}

fn java_type() -> impl Strategy<Value = JavaType> {
    let leaf = prop_oneof![
        Just(JavaType::Primitive(Primitive::Int)),
        Just(JavaType::class("java.lang.String")),
        Just(JavaType::variable("T")),
    ];
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(JavaType::array_of),
            proptest::collection::vec(inner.clone(), 1..3)
                .prop_map(|args| JavaType::parameterized("java.util.Map", args)),
            inner.prop_map(JavaType::extends),
        ]
    })
}

/// A generic class whose erased types are plain and whose resolved types
/// are arbitrary
fn generic_class() -> impl Strategy<Value = ClassDescriptor> {
    (
        "[A-Z][a-zA-Z]{0,12}",
        proptest::collection::vec((ident(), modifiers(), java_type()), 0..5),
        proptest::collection::vec((ident(), modifiers(), java_type()), 0..5),
    )
        .prop_map(|(name, fields, methods)| {
            let mut class = ClassDescriptor::new(format!("p.{}", name)).with_type_parameters(vec![
                TypeParameter::new("T", vec![JavaType::class("java.lang.Number")]),
            ]);
            for (name, modifiers, ty) in fields {
                class = class.with_field(
                    FieldDescriptor::new(name, modifiers, JavaType::class("java.util.Map"))
                        .with_generic_type(ty),
                );
            }
            for (name, modifiers, ty) in methods {
                class = class.with_method(
                    ExecutableDescriptor::method(name, modifiers, JavaType::object())
                        .with_parameter(JavaType::class("java.util.List"))
                        .with_generic_parameter_types(vec![ty.clone()])
                        .with_generic_return_type(ty),
                );
            }
            class
        })
}

fn row_widths(text: &str) -> Vec<usize> {
    text.lines().map(|row| row.chars().count()).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Total orders
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn method_order_is_total(a in method(), b in method(), c in method()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn parameter_order_is_total(a in parameter(), b in parameter()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
    }

    #[test]
    fn field_order_is_total(a in field(), b in field()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Box geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_share_one_width(class in generic_class(), extra in 0usize..6, pad in 0usize..4) {
        let config = Config::new().with_all_visible();
        let rendered = generate_structural(&config, &class).unwrap();
        let min = rendered.min_width();

        let natural = row_widths(&rendered.to_string());
        prop_assert!(natural.iter().all(|w| *w == min + 2));

        let wide = row_widths(&rendered.render(pad, min + extra));
        prop_assert!(wide.iter().all(|w| *w == min + extra + 2 + pad));
    }

    #[test]
    fn header_is_centred(class in generic_class(), extra in 0usize..6) {
        let config = Config::new().with_all_visible();
        let rendered = generate_structural(&config, &class).unwrap();
        let text = rendered.render(0, rendered.min_width() + extra);

        let header_row: Vec<char> = text.lines().nth(1).unwrap().chars().collect();
        let inner = &header_row[1..header_row.len() - 1];
        let left = inner.iter().take_while(|c| **c == ' ').count();
        let right = inner.iter().rev().take_while(|c| **c == ' ').count();
        prop_assert!(left <= right);
        prop_assert!(right - left <= 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Erasure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn generics_off_erases_everything(class in generic_class()) {
        let config = Config::new().with_all_visible().with_generics(false);
        let text = generate_structural(&config, &class).unwrap().to_string();
        prop_assert!(!text.contains('<'));
        prop_assert!(!text.contains("extends"));
        prop_assert!(!text.contains('?'));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Chain layout
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn chain_boxes_are_centred(
        parent in generic_class(),
        child in generic_class(),
        pad in 0usize..4,
    ) {
        let subject = child.with_superclass(parent);
        let config = Config::new().with_all_visible().with_superclasses(true);
        let rendered = generate_structural(&config, &subject).unwrap();
        let width = rendered.min_width();
        let text = rendered.render(pad, width);

        let Rendered::Chained(chain) = &rendered else {
            return Err(TestCaseError::fail("expected a chain"));
        };
        prop_assert_eq!(chain.diagrams().len(), 2);

        let connector = text.lines().find(|row| row.contains('⇧')).unwrap();
        prop_assert_eq!(connector.chars().count(), pad + width / 2 + 1);

        for row in text.lines().filter(|row| row.contains('┌')) {
            let indent = row.chars().take_while(|c| *c == ' ').count();
            let box_width = row.chars().count() - indent - 2;
            prop_assert_eq!(indent, pad + (width - box_width) / 2);
        }
    }
}
