//! Shared fixtures: a small class-file assembler and paired classes
//!
//! Every fixture class exists twice, once as a `ClassDescriptor` the way a
//! runtime would describe the loaded type, and once as the class-file bytes
//! a compiler would emit for it.

#![allow(dead_code)]

use std::collections::HashMap;

use umlbox::access_flags::{ABSTRACT, ENUM, FINAL, PRIVATE, PROTECTED, PUBLIC, STATIC, SYNTHETIC};
use umlbox::prelude::*;

pub const ACC_SUPER: u16 = 0x0020;

struct Member {
    access: u16,
    name: String,
    descriptor: String,
    signature: Option<String>,
    parameter_names: Option<Vec<Option<String>>>,
    has_code: bool,
}

/// Assembles class-file bytes with a real constant pool
pub struct ClassFileBuilder {
    name: String,
    super_name: Option<String>,
    access: u16,
    interfaces: Vec<String>,
    signature: Option<String>,
    fields: Vec<Member>,
    methods: Vec<Member>,
}

impl ClassFileBuilder {
    /// `name` is an internal name such as `a/Outer$Inner`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            super_name: Some("java/lang/Object".to_string()),
            access: PUBLIC | ACC_SUPER,
            interfaces: Vec::new(),
            signature: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    pub fn super_class(mut self, name: Option<&str>) -> Self {
        self.super_name = name.map(str::to_string);
        self
    }

    pub fn interface(mut self, name: &str) -> Self {
        self.interfaces.push(name.to_string());
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    pub fn field(mut self, access: u16, name: &str, descriptor: &str, signature: Option<&str>) -> Self {
        self.fields.push(Member {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: signature.map(str::to_string),
            parameter_names: None,
            has_code: false,
        });
        self
    }

    pub fn method(mut self, access: u16, name: &str, descriptor: &str, signature: Option<&str>) -> Self {
        self.methods.push(Member {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: signature.map(str::to_string),
            parameter_names: None,
            has_code: true,
        });
        self
    }

    /// Like [`method`](Self::method), with a `MethodParameters` attribute
    pub fn method_with_names(
        mut self,
        access: u16,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        names: &[Option<&str>],
    ) -> Self {
        self = self.method(access, name, descriptor, signature);
        if let Some(last) = self.methods.last_mut() {
            last.parameter_names = Some(names.iter().map(|n| n.map(str::to_string)).collect());
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = Pool::default();
        // An 8-byte constant so the two-slot rule is always exercised
        pool.long(0x0102_0304_0506_0708);

        let this_class = pool.class(&self.name);
        let super_class = self.super_name.as_deref().map(|n| pool.class(n)).unwrap_or(0);
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();
        let fields: Vec<Vec<u8>> = self.fields.iter().map(|m| member(&mut pool, m)).collect();
        let methods: Vec<Vec<u8>> = self.methods.iter().map(|m| member(&mut pool, m)).collect();

        let mut class_attributes = Vec::new();
        let mut attribute_count = 1u16;
        attribute(&mut class_attributes, pool.utf8("SourceFile"), &pool_ref(pool.utf8("Fixture.java")));
        if let Some(signature) = &self.signature {
            attribute_count += 1;
            let index = pool.utf8(signature);
            attribute(&mut class_attributes, pool.utf8("Signature"), &pool_ref(index));
        }

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        u16_be(&mut out, 0);
        u16_be(&mut out, 61);
        u16_be(&mut out, pool.slots);
        out.extend_from_slice(&pool.bytes);
        u16_be(&mut out, self.access);
        u16_be(&mut out, this_class);
        u16_be(&mut out, super_class);
        u16_be(&mut out, interfaces.len() as u16);
        for index in interfaces {
            u16_be(&mut out, index);
        }
        u16_be(&mut out, fields.len() as u16);
        for field in fields {
            out.extend_from_slice(&field);
        }
        u16_be(&mut out, methods.len() as u16);
        for method in methods {
            out.extend_from_slice(&method);
        }
        u16_be(&mut out, attribute_count);
        out.extend_from_slice(&class_attributes);
        out
    }
}

fn member(pool: &mut Pool, m: &Member) -> Vec<u8> {
    let mut out = Vec::new();
    u16_be(&mut out, m.access);
    u16_be(&mut out, pool.utf8(&m.name));
    u16_be(&mut out, pool.utf8(&m.descriptor));

    let mut attributes = Vec::new();
    let mut count = 0u16;
    if m.has_code && m.access & ABSTRACT == 0 {
        count += 1;
        // max_stack, max_locals, code_length, `return`, no handlers, no attributes
        let code = [0, 1, 0, 1, 0, 0, 0, 1, 0xB1, 0, 0, 0, 0];
        attribute(&mut attributes, pool.utf8("Code"), &code);
    }
    if let Some(signature) = &m.signature {
        count += 1;
        let index = pool.utf8(signature);
        attribute(&mut attributes, pool.utf8("Signature"), &pool_ref(index));
    }
    if let Some(names) = &m.parameter_names {
        count += 1;
        let mut body = vec![names.len() as u8];
        for name in names {
            let index = name.as_deref().map(|n| pool.utf8(n)).unwrap_or(0);
            u16_be(&mut body, index);
            u16_be(&mut body, 0);
        }
        attribute(&mut attributes, pool.utf8("MethodParameters"), &body);
    }

    u16_be(&mut out, count);
    out.extend_from_slice(&attributes);
    out
}

fn attribute(out: &mut Vec<u8>, name_index: u16, body: &[u8]) {
    u16_be(out, name_index);
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(body);
}

fn pool_ref(index: u16) -> [u8; 2] {
    index.to_be_bytes()
}

fn u16_be(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

struct Pool {
    bytes: Vec<u8>,
    /// Next free index; also the `constant_pool_count` field
    slots: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            slots: 1,
            utf8: HashMap::new(),
            classes: HashMap::new(),
        }
    }
}

impl Pool {
    fn utf8(&mut self, text: &str) -> u16 {
        if let Some(index) = self.utf8.get(text) {
            return *index;
        }
        let encoded = modified_utf8(text);
        self.bytes.push(1);
        self.bytes.extend_from_slice(&(encoded.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(&encoded);
        let index = self.slots;
        self.slots += 1;
        self.utf8.insert(text.to_string(), index);
        index
    }

    fn class(&mut self, name: &str) -> u16 {
        if let Some(index) = self.classes.get(name) {
            return *index;
        }
        let name_index = self.utf8(name);
        self.bytes.push(7);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        let index = self.slots;
        self.slots += 1;
        self.classes.insert(name.to_string(), index);
        index
    }

    fn long(&mut self, value: u64) {
        self.bytes.push(5);
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self.slots += 2;
    }
}

/// Standard UTF-8 except for NUL and characters outside the BMP
fn modified_utf8(text: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Paired fixtures
// ---------------------------------------------------------------------------

pub fn double() -> JavaType {
    JavaType::Primitive(Primitive::Double)
}

pub fn int() -> JavaType {
    JavaType::Primitive(Primitive::Int)
}

pub fn void() -> JavaType {
    JavaType::Primitive(Primitive::Void)
}

pub fn string() -> JavaType {
    JavaType::class("java.lang.String")
}

/// The textbook rectangle: two private fields, a constructor, three methods
pub fn rectangle() -> (ClassDescriptor, Vec<u8>) {
    let descriptor = ClassDescriptor::new("shapes.Rectangle")
        .with_simple_name("Rectangle")
        .with_field(FieldDescriptor::new("length", PRIVATE, double()))
        .with_field(FieldDescriptor::new("width", PRIVATE, double()))
        .with_constructor(ExecutableDescriptor::constructor("shapes.Rectangle", PUBLIC))
        .with_method(ExecutableDescriptor::method("setWidth", PUBLIC, void()).with_parameter(double()))
        .with_method(ExecutableDescriptor::method("getWidth", PUBLIC, double()))
        .with_method(ExecutableDescriptor::method("getArea", PUBLIC, double()));

    let bytes = ClassFileBuilder::new("shapes/Rectangle")
        .field(PRIVATE, "length", "D", None)
        .field(PRIVATE, "width", "D", None)
        .method(PUBLIC, "<init>", "()V", None)
        .method(PUBLIC, "setWidth", "(D)V", None)
        .method(PUBLIC, "getWidth", "()D", None)
        .method(PUBLIC, "getArea", "()D", None)
        .build();

    (descriptor, bytes)
}

/// An enum whose constructor signature leaves out the name and ordinal
pub fn color_enum() -> (ClassDescriptor, Vec<u8>) {
    let color = JavaType::class("paint.Color");
    let descriptor = ClassDescriptor::new("paint.Color")
        .with_simple_name("Color")
        .with_modifiers(PUBLIC | FINAL | ENUM)
        .with_field(FieldDescriptor::new("RED", PUBLIC | STATIC | FINAL | ENUM, color.clone()))
        .with_field(FieldDescriptor::new("label", PRIVATE | FINAL, string()))
        .with_field(FieldDescriptor::new(
            "$VALUES",
            PRIVATE | STATIC | FINAL | SYNTHETIC,
            JavaType::array_of(color.clone()),
        ))
        .with_constructor(
            ExecutableDescriptor::constructor("paint.Color", PRIVATE)
                .with_parameter(string())
                .with_parameter(int())
                .with_parameter(string())
                .with_generic_parameter_types(vec![string()]),
        )
        .with_method(ExecutableDescriptor::method(
            "values",
            PUBLIC | STATIC,
            JavaType::array_of(color.clone()),
        ))
        .with_method(
            ExecutableDescriptor::method("valueOf", PUBLIC | STATIC, color)
                .with_parameter(string()),
        )
        .with_superclass(
            ClassDescriptor::new("java.lang.Enum")
                .with_simple_name("Enum")
                .with_modifiers(PUBLIC | ABSTRACT)
                .with_type_parameters(vec![TypeParameter::new(
                    "E",
                    vec![JavaType::parameterized("java.lang.Enum", vec![JavaType::variable("E")])],
                )])
                .with_method(ExecutableDescriptor::method("name", PUBLIC | FINAL, string()))
                .with_superclass(ClassDescriptor::universal_base()),
        );

    let bytes = ClassFileBuilder::new("paint/Color")
        .access(PUBLIC | FINAL | ENUM | ACC_SUPER)
        .super_class(Some("java/lang/Enum"))
        .signature("Ljava/lang/Enum<Lpaint/Color;>;")
        .field(PUBLIC | STATIC | FINAL | ENUM, "RED", "Lpaint/Color;", None)
        .field(PRIVATE | FINAL, "label", "Ljava/lang/String;", None)
        .field(PRIVATE | STATIC | FINAL | SYNTHETIC, "$VALUES", "[Lpaint/Color;", None)
        .method(PUBLIC | STATIC, "values", "()[Lpaint/Color;", None)
        .method(PUBLIC | STATIC, "valueOf", "(Ljava/lang/String;)Lpaint/Color;", None)
        .method(
            PRIVATE,
            "<init>",
            "(Ljava/lang/String;ILjava/lang/String;)V",
            Some("(Ljava/lang/String;)V"),
        )
        .method(STATIC, "<clinit>", "()V", None)
        .method(PRIVATE | STATIC | SYNTHETIC, "$values", "()[Lpaint/Color;", None)
        .build();

    (descriptor, bytes)
}

/// `java.lang.Enum<E extends Enum<E>>` with a single visible method
pub fn enum_base() -> Vec<u8> {
    ClassFileBuilder::new("java/lang/Enum")
        .access(PUBLIC | ABSTRACT | ACC_SUPER)
        .signature("<E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;")
        .method(PUBLIC | FINAL, "name", "()Ljava/lang/String;", None)
        .build()
}

/// `java.lang.Object` reduced to its constructor
pub fn object() -> Vec<u8> {
    ClassFileBuilder::new("java/lang/Object")
        .super_class(None)
        .method(PUBLIC, "<init>", "()V", None)
        .build()
}

/// A non-static inner class with a generic constructor parameter
pub fn inner_class() -> (ClassDescriptor, Vec<u8>) {
    let list = JavaType::class("java.util.List");
    let descriptor = ClassDescriptor::new("net.Outer$Inner")
        .with_simple_name("Inner")
        .nested_in("net.Outer")
        .with_field(FieldDescriptor::new(
            "this$0",
            FINAL | SYNTHETIC,
            JavaType::class("net.Outer"),
        ))
        .with_constructor(
            ExecutableDescriptor::constructor("net.Outer$Inner", PUBLIC)
                .with_parameter(JavaType::class("net.Outer"))
                .with_parameter(list.clone())
                .with_generic_parameter_types(vec![JavaType::parameterized(
                    "java.util.List",
                    vec![string()],
                )]),
        )
        .with_method(ExecutableDescriptor::method("size", PUBLIC, int()));

    let bytes = ClassFileBuilder::new("net/Outer$Inner")
        .field(FINAL | SYNTHETIC, "this$0", "Lnet/Outer;", None)
        .method(
            PUBLIC,
            "<init>",
            "(Lnet/Outer;Ljava/util/List;)V",
            Some("(Ljava/util/List<Ljava/lang/String;>;)V"),
        )
        .method(PUBLIC, "size", "()I", None)
        .build();

    (descriptor, bytes)
}

/// `Registry<K extends Comparable<K>, V> implements Iterable<K>` with
/// wildcards, generic methods, arrays of type variables and an inner class
/// of a parameterized owner
pub fn registry() -> (ClassDescriptor, Vec<u8>) {
    let k = || JavaType::variable("K");
    let v = || JavaType::variable("V");
    let a = || JavaType::variable("A");
    let number = || JavaType::class("java.lang.Number");
    let function = || JavaType::class("java.util.function.Function");

    let descriptor = ClassDescriptor::new("store.Registry")
        .with_simple_name("Registry")
        .with_type_parameters(vec![
            TypeParameter::new("K", vec![JavaType::parameterized("java.lang.Comparable", vec![k()])]),
            TypeParameter::new("V", vec![JavaType::object()]),
        ])
        .with_field(
            FieldDescriptor::new("entries", PUBLIC, JavaType::class("java.util.Map")).with_generic_type(
                JavaType::parameterized(
                    "java.util.Map",
                    vec![k(), JavaType::parameterized("java.util.List", vec![v()])],
                ),
            ),
        )
        .with_field(
            FieldDescriptor::new("head", PROTECTED, JavaType::class("store.Registry$Node"))
                .with_generic_type(JavaType::Parameterized {
                    raw: "store.Registry$Node".to_string(),
                    owner: Some(Box::new(JavaType::parameterized(
                        "store.Registry",
                        vec![k(), v()],
                    ))),
                    args: vec![],
                }),
        )
        .with_field(
            FieldDescriptor::new("defaults", PUBLIC, JavaType::array_of(JavaType::object()))
                .with_generic_type(JavaType::array_of(v())),
        )
        .with_constructor(ExecutableDescriptor::constructor("store.Registry", PUBLIC))
        .with_method(
            ExecutableDescriptor::method("convert", PUBLIC, number())
                .with_named_parameter("fn", function())
                .with_named_parameter("fallback", JavaType::array_of(number()))
                .with_generic_parameter_types(vec![
                    JavaType::parameterized(
                        "java.util.function.Function",
                        vec![JavaType::super_of(v()), JavaType::extends(a())],
                    ),
                    JavaType::array_of(a()),
                ])
                .with_generic_return_type(a()),
        )
        .with_method(
            ExecutableDescriptor::method("firstEntry", PUBLIC, JavaType::class("java.util.Map$Entry"))
                .with_generic_return_type(JavaType::parameterized("java.util.Map$Entry", vec![k(), v()])),
        )
        .with_method(
            ExecutableDescriptor::method("keys", PUBLIC, JavaType::class("java.util.Set"))
                .with_generic_return_type(JavaType::parameterized(
                    "java.util.Set",
                    vec![JavaType::extends(JavaType::object())],
                )),
        )
        .with_method(
            ExecutableDescriptor::method("iterator", PUBLIC, JavaType::class("java.util.Iterator"))
                .with_generic_return_type(JavaType::parameterized("java.util.Iterator", vec![k()])),
        );

    let bytes = ClassFileBuilder::new("store/Registry")
        .interface("java/lang/Iterable")
        .signature(
            "<K::Ljava/lang/Comparable<TK;>;V:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Iterable<TK;>;",
        )
        .field(
            PUBLIC,
            "entries",
            "Ljava/util/Map;",
            Some("Ljava/util/Map<TK;Ljava/util/List<TV;>;>;"),
        )
        .field(
            PROTECTED,
            "head",
            "Lstore/Registry$Node;",
            Some("Lstore/Registry<TK;TV;>.Node;"),
        )
        .field(PUBLIC, "defaults", "[Ljava/lang/Object;", Some("[TV;"))
        .method(PUBLIC, "<init>", "()V", None)
        .method_with_names(
            PUBLIC,
            "convert",
            "(Ljava/util/function/Function;[Ljava/lang/Number;)Ljava/lang/Number;",
            Some("<A:Ljava/lang/Number;>(Ljava/util/function/Function<-TV;+TA;>;[TA;)TA;"),
            &[Some("fn"), Some("fallback")],
        )
        .method(
            PUBLIC,
            "firstEntry",
            "()Ljava/util/Map$Entry;",
            Some("()Ljava/util/Map$Entry<TK;TV;>;"),
        )
        .method(PUBLIC, "keys", "()Ljava/util/Set;", Some("()Ljava/util/Set<*>;"))
        .method(
            PUBLIC,
            "iterator",
            "()Ljava/util/Iterator;",
            Some("()Ljava/util/Iterator<TK;>;"),
        )
        .method(PRIVATE | STATIC | SYNTHETIC, "lambda$keys$0", "(Ljava/lang/Object;)Z", None)
        .build();

    (descriptor, bytes)
}


/// Type parameters whose bounds refer back to themselves
pub fn self_bounded() -> (ClassDescriptor, Vec<u8>) {
    let t = || JavaType::variable("T");
    let e = || JavaType::variable("E");
    let descriptor = ClassDescriptor::new("sort.Sorter")
        .with_simple_name("Sorter")
        .with_type_parameters(vec![
            TypeParameter::new(
                "T",
                vec![JavaType::parameterized("java.lang.Comparable", vec![JavaType::super_of(t())])],
            ),
            TypeParameter::new("E", vec![JavaType::parameterized("java.lang.Enum", vec![e()])]),
        ])
        .with_method(
            ExecutableDescriptor::method("sort", PUBLIC | STATIC, void())
                .with_parameter(JavaType::class("java.util.List"))
                .with_generic_parameter_types(vec![JavaType::parameterized(
                    "java.util.List",
                    vec![JavaType::extends(t())],
                )]),
        );

    let bytes = ClassFileBuilder::new("sort/Sorter")
        .signature(
            "<T::Ljava/lang/Comparable<-TT;>;E:Ljava/lang/Enum<TE;>;>Ljava/lang/Object;",
        )
        .method(
            PUBLIC | STATIC,
            "sort",
            "(Ljava/util/List;)V",
            Some("(Ljava/util/List<+TT;>;)V"),
        )
        .build();

    (descriptor, bytes)
}

/// `p.Pair<T extends Comparable<U>, U extends Number>`: a bound naming a
/// parameter declared after it
pub fn forward_bounds() -> (ClassDescriptor, Vec<u8>) {
    let descriptor = ClassDescriptor::new("p.Pair")
        .with_type_parameters(vec![
            TypeParameter::new(
                "T",
                vec![JavaType::parameterized(
                    "java.lang.Comparable",
                    vec![JavaType::variable("U")],
                )],
            ),
            TypeParameter::new("U", vec![JavaType::class("java.lang.Number")]),
        ])
        .with_field(
            FieldDescriptor::new("first", PUBLIC, JavaType::class("java.lang.Comparable"))
                .with_generic_type(JavaType::variable("T")),
        )
        .with_field(
            FieldDescriptor::new("second", PUBLIC, JavaType::class("java.lang.Number"))
                .with_generic_type(JavaType::variable("U")),
        );

    let bytes = ClassFileBuilder::new("p/Pair")
        .signature("<T::Ljava/lang/Comparable<TU;>;U:Ljava/lang/Number;>Ljava/lang/Object;")
        .field(PUBLIC, "first", "Ljava/lang/Comparable;", Some("TT;"))
        .field(PUBLIC, "second", "Ljava/lang/Number;", Some("TU;"))
        .build();

    (descriptor, bytes)
}

/// `p.Graph<A extends Node<B>, B extends Edge<A>>`: two bounds naming each
/// other
pub fn mutual_bounds() -> (ClassDescriptor, Vec<u8>) {
    let descriptor = ClassDescriptor::new("p.Graph")
        .with_type_parameters(vec![
            TypeParameter::new(
                "A",
                vec![JavaType::parameterized("p.Node", vec![JavaType::variable("B")])],
            ),
            TypeParameter::new(
                "B",
                vec![JavaType::parameterized("p.Edge", vec![JavaType::variable("A")])],
            ),
        ])
        .with_method(
            ExecutableDescriptor::method("link", PUBLIC, JavaType::class("p.Edge"))
                .with_parameter(JavaType::class("p.Node"))
                .with_generic_parameter_types(vec![JavaType::variable("A")])
                .with_generic_return_type(JavaType::variable("B")),
        );

    let bytes = ClassFileBuilder::new("p/Graph")
        .signature("<A:Lp/Node<TB;>;B:Lp/Edge<TA;>;>Ljava/lang/Object;")
        .method(PUBLIC, "link", "(Lp/Node;)Lp/Edge;", Some("(TA;)TB;"))
        .build();

    (descriptor, bytes)
}
