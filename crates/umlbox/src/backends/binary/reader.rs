//! Class-file reader
//!
//! Parses the parts of the JVM class-file format that describe structure:
//! the constant pool, class header, fields, methods, and the `Signature` and
//! `MethodParameters` attributes. Code and every other attribute are
//! skipped. Reading is strict: a truncated file, a bad constant-pool index or
//! a constant of the wrong kind is a [`DiagramError::ClassFormat`].

use tracing::{debug, span, trace, Level};

use crate::core::{DiagramError, Result};
use crate::signature::names::internal_to_binary;

pub const MAGIC: u32 = 0xCAFE_BABE;

const SIGNATURE: &str = "Signature";
const METHOD_PARAMETERS: &str = "MethodParameters";

/// The class header, as seen before any member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub minor_version: u16,
    pub major_version: u16,
    pub access: u16,
    /// Internal name, e.g. `java/util/Map$Entry`
    pub name: String,
    /// `None` only for `java/lang/Object` and module descriptors
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub signature: Option<String>,
}

impl ClassHeader {
    /// `java.util.Map$Entry`
    pub fn binary_name(&self) -> String {
        internal_to_binary(&self.name)
    }

    pub fn super_binary_name(&self) -> Option<String> {
        self.super_name.as_deref().map(internal_to_binary)
    }
}

/// A field or method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub access: u16,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    /// From `MethodParameters`; an entry is `None` when the name is absent
    pub parameter_names: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub header: ClassHeader,
    pub fields: Vec<MemberInfo>,
    pub methods: Vec<MemberInfo>,
}

/// Receives a class in declaration order: header, fields, methods, end
pub trait ClassVisitor {
    fn visit_class(&mut self, header: &ClassHeader) -> Result<()>;

    fn visit_field(&mut self, _field: &MemberInfo) -> Result<()> {
        Ok(())
    }

    fn visit_method(&mut self, _method: &MemberInfo) -> Result<()> {
        Ok(())
    }

    fn visit_end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let span = span!(Level::DEBUG, "read_class", len = bytes.len());
        let _enter = span.enter();

        let mut cursor = ByteCursor::new(bytes);
        let magic = cursor.u32()?;
        if magic != MAGIC {
            return Err(DiagramError::class_format(
                format!("bad magic 0x{magic:08X}"),
                0,
            ));
        }
        let minor_version = cursor.u16()?;
        let major_version = cursor.u16()?;
        let pool = ConstantPool::parse(&mut cursor)?;

        let access = cursor.u16()?;
        let name = pool.class_name(cursor.u16()?, cursor.offset())?.to_string();
        let super_index = cursor.u16()?;
        let super_name = if super_index == 0 {
            None
        } else {
            Some(pool.class_name(super_index, cursor.offset())?.to_string())
        };
        let interface_count = cursor.u16()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            let index = cursor.u16()?;
            interfaces.push(pool.class_name(index, cursor.offset())?.to_string());
        }

        let fields = read_members(&mut cursor, &pool)?;
        let methods = read_members(&mut cursor, &pool)?;
        let attributes = read_attributes(&mut cursor, &pool)?;

        debug!(
            class = name.as_str(),
            major_version,
            constants = pool.len(),
            fields = fields.len(),
            methods = methods.len(),
            "Read class file"
        );

        Ok(Self {
            header: ClassHeader {
                minor_version,
                major_version,
                access,
                name,
                super_name,
                interfaces,
                signature: attributes.signature,
            },
            fields,
            methods,
        })
    }

    /// Replay the class through `visitor`
    pub fn accept(&self, visitor: &mut dyn ClassVisitor) -> Result<()> {
        visitor.visit_class(&self.header)?;
        for field in &self.fields {
            visitor.visit_field(field)?;
        }
        for method in &self.methods {
            visitor.visit_method(method)?;
        }
        visitor.visit_end()
    }
}

fn read_members(cursor: &mut ByteCursor<'_>, pool: &ConstantPool) -> Result<Vec<MemberInfo>> {
    let count = cursor.u16()?;
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let access = cursor.u16()?;
        let name = pool.utf8(cursor.u16()?, cursor.offset())?.to_string();
        let descriptor = pool.utf8(cursor.u16()?, cursor.offset())?.to_string();
        let attributes = read_attributes(cursor, pool)?;
        trace!(name = name.as_str(), descriptor = descriptor.as_str(), "Member");
        members.push(MemberInfo {
            access,
            name,
            descriptor,
            signature: attributes.signature,
            parameter_names: attributes.parameter_names,
        });
    }
    Ok(members)
}

#[derive(Default)]
struct Attributes {
    signature: Option<String>,
    parameter_names: Option<Vec<Option<String>>>,
}

fn read_attributes(cursor: &mut ByteCursor<'_>, pool: &ConstantPool) -> Result<Attributes> {
    let mut found = Attributes::default();
    let count = cursor.u16()?;
    for _ in 0..count {
        let name = pool.utf8(cursor.u16()?, cursor.offset())?;
        let length = cursor.u32()? as usize;
        let start = cursor.offset();
        let mut body = ByteCursor::at(cursor.take(length)?, start);

        match name {
            SIGNATURE => {
                let index = body.u16()?;
                found.signature = Some(pool.utf8(index, body.offset())?.to_string());
            }
            METHOD_PARAMETERS => {
                let count = body.u8()?;
                let mut names = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let index = body.u16()?;
                    let _flags = body.u16()?;
                    names.push(if index == 0 {
                        None
                    } else {
                        Some(pool.utf8(index, body.offset())?.to_string())
                    });
                }
                found.parameter_names = Some(names);
            }
            _ => {}
        }
    }
    Ok(found)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Constant {
    /// Slot 0 and the upper half of long/double constants
    Unusable,
    Utf8(String),
    Class { name_index: u16 },
    Other { tag: u8 },
}

#[derive(Debug)]
struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let count = cursor.u16()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable);

        while entries.len() < count {
            let offset = cursor.offset();
            let tag = cursor.u8()?;
            let (constant, slots) = match tag {
                1 => {
                    let length = cursor.u16()? as usize;
                    let start = cursor.offset();
                    let bytes = cursor.take(length)?;
                    (Constant::Utf8(decode_modified_utf8(bytes, start)?), 1)
                }
                7 => (
                    Constant::Class {
                        name_index: cursor.u16()?,
                    },
                    1,
                ),
                3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                    cursor.skip(4)?;
                    (Constant::Other { tag }, 1)
                }
                5 | 6 => {
                    cursor.skip(8)?;
                    (Constant::Other { tag }, 2)
                }
                8 | 16 | 19 | 20 => {
                    cursor.skip(2)?;
                    (Constant::Other { tag }, 1)
                }
                15 => {
                    cursor.skip(3)?;
                    (Constant::Other { tag }, 1)
                }
                other => {
                    return Err(DiagramError::class_format(
                        format!("unknown constant pool tag {other} at index {}", entries.len()),
                        offset,
                    ))
                }
            };
            entries.push(constant);
            if slots == 2 {
                entries.push(Constant::Unusable);
            }
        }

        if entries.len() > count {
            return Err(DiagramError::class_format(
                "8-byte constant overruns the constant pool",
                cursor.offset(),
            ));
        }
        Ok(Self { entries })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: u16, offset: usize) -> Result<&Constant> {
        self.entries.get(index as usize).ok_or_else(|| {
            DiagramError::class_format(
                format!(
                    "constant pool index {index} out of range (pool has {} entries)",
                    self.entries.len()
                ),
                offset,
            )
        })
    }

    fn utf8(&self, index: u16, offset: usize) -> Result<&str> {
        match self.get(index, offset)? {
            Constant::Utf8(text) => Ok(text),
            other => Err(DiagramError::class_format(
                format!("constant {index} should be Utf8, found {other:?}"),
                offset,
            )),
        }
    }

    fn class_name(&self, index: u16, offset: usize) -> Result<&str> {
        match self.get(index, offset)? {
            Constant::Class { name_index } => self.utf8(*name_index, offset),
            other => Err(DiagramError::class_format(
                format!("constant {index} should be Class, found {other:?}"),
                offset,
            )),
        }
    }
}

/// Decode the JVM's modified UTF-8: NUL is two bytes and supplementary
/// characters are stored as surrogate pairs of three bytes each.
fn decode_modified_utf8(bytes: &[u8], offset: usize) -> Result<String> {
    let malformed = |at: usize| {
        DiagramError::class_format("malformed modified UTF-8 constant", offset + at)
    };
    let continuation = |at: usize| -> Result<u16> {
        match bytes.get(at) {
            Some(b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
            _ => Err(malformed(at)),
        }
    };

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        if lead & 0x80 == 0 {
            units.push(u16::from(lead));
            i += 1;
        } else if lead & 0xE0 == 0xC0 {
            units.push((u16::from(lead & 0x1F) << 6) | continuation(i + 1)?);
            i += 2;
        } else if lead & 0xF0 == 0xE0 {
            units.push(
                (u16::from(lead & 0x0F) << 12) | (continuation(i + 1)? << 6) | continuation(i + 2)?,
            );
            i += 3;
        } else {
            return Err(malformed(i));
        }
    }

    String::from_utf16(&units).map_err(|_| malformed(0))
}

/// Big-endian reads over a byte slice, reporting absolute offsets
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, 0)
    }

    /// A cursor over a sub-slice that starts `base` bytes into the file
    fn at(bytes: &'a [u8], base: usize) -> Self {
        Self { bytes, pos: 0, base }
    }

    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(count).filter(|end| *end <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(DiagramError::class_format(
                format!(
                    "truncated: wanted {count} bytes, {} left",
                    self.bytes.len() - self.pos
                ),
                self.offset(),
            )),
        }
    }

    fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
