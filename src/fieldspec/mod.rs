//! Declarative fixed-layout record decoding.
//!
//! A field spec is an ordered list of [`Field`] descriptors. [`decode`] reads
//! exactly the bytes the spec declares from the front of a buffer, decodes
//! every field little-endian and evaluates the per-field checks as it goes,
//! so a structural assumption is declared next to the field it constrains.
//!
//! Specs used by the parsers are `const` arrays:
//!
//! ```
//! use olefield::fieldspec::{decode, Field, Severity};
//!
//! const HEADER: [Field<'static>; 2] = [
//!     Field::u16("magic").expect(0xbeef, Severity::Fatal),
//!     Field::u32("length"),
//! ];
//!
//! let record = decode(&[0xef, 0xbe, 4, 0, 0, 0], &HEADER, "example header")?;
//! assert_eq!(record.consumed(), 6);
//! assert_eq!(record.int("length")?, 4);
//! # Ok::<(), olefield::Error>(())
//! ```
//!
//! Fields whose width depends on data are decoded in two steps: decode the
//! prefix carrying the length, then decode a second spec built with
//! [`Field::bytes`] and that length.
//!
//! The same layouts can also be written in a line-oriented text form, see
//! [`FieldSpec::parse`].

mod text;

pub use text::FieldSpec;

use crate::common::binary::{read_i16_le, read_i32_le, read_u16_le, read_u32_le};
use crate::common::error::{Error, Result, SpecError};
use smallvec::SmallVec;
use std::fmt;

/// Primitive type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed 16-bit integer
    I16,
    /// Unsigned 16-bit integer
    U16,
    /// Signed 32-bit integer
    I32,
    /// Unsigned 32-bit integer
    U32,
    /// Byte string of the given length
    Bytes(usize),
}

impl FieldKind {
    /// Width of the field in bytes
    pub const fn width(self) -> usize {
        match self {
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 => 4,
            FieldKind::Bytes(len) => len,
        }
    }

    /// Whether an integer literal is representable in this kind
    pub(crate) fn holds(self, value: i64) -> bool {
        match self {
            FieldKind::I16 => i16::try_from(value).is_ok(),
            FieldKind::U16 => u16::try_from(value).is_ok(),
            FieldKind::I32 => i32::try_from(value).is_ok(),
            FieldKind::U32 => u32::try_from(value).is_ok(),
            FieldKind::Bytes(_) => false,
        }
    }
}

/// What a failed check means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The input is not a valid instance of the format
    Fatal,
    /// The input is a variant of the format that is not handled
    Unsupported,
}

/// Constant a field is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected<'n> {
    Int(i64),
    Bytes(&'n [u8]),
}

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Int(v) => fmt::Display::fmt(&Value::Int(*v), f),
            Expected::Bytes(b) => fmt::Display::fmt(&Value::Bytes(b), f),
        }
    }
}

/// Equality check attached to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check<'n> {
    pub expected: Expected<'n>,
    pub severity: Severity,
}

impl Check<'_> {
    fn verify(&self, value: &Value<'_>, field: &str, context: &str) -> Result<()> {
        let matches = match (self.expected, value) {
            (Expected::Int(e), Value::Int(v)) => e == *v,
            (Expected::Bytes(e), Value::Bytes(v)) => e == *v,
            (Expected::Int(_), Value::Bytes(_)) => {
                return Err(SpecError::KindMismatch {
                    field: field.to_string(),
                    expected: "an integer",
                }
                .into());
            },
            (Expected::Bytes(_), Value::Int(_)) => {
                return Err(SpecError::KindMismatch {
                    field: field.to_string(),
                    expected: "a byte string",
                }
                .into());
            },
        };
        if matches {
            return Ok(());
        }
        Err(match self.severity {
            Severity::Fatal => Error::bad_data(
                context,
                format!("{} is {}, expected {}", field, value, self.expected),
            ),
            Severity::Unsupported => Error::Unsupported {
                context: context.to_string(),
                field: field.to_string(),
                value: value.to_string(),
            },
        })
    }
}

/// One field of a fixed-layout record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'n> {
    pub kind: FieldKind,
    pub name: &'n str,
    pub check: Option<Check<'n>>,
}

impl<'n> Field<'n> {
    pub const fn new(kind: FieldKind, name: &'n str) -> Self {
        Self {
            kind,
            name,
            check: None,
        }
    }

    pub const fn i16(name: &'n str) -> Self {
        Self::new(FieldKind::I16, name)
    }

    pub const fn u16(name: &'n str) -> Self {
        Self::new(FieldKind::U16, name)
    }

    pub const fn i32(name: &'n str) -> Self {
        Self::new(FieldKind::I32, name)
    }

    pub const fn u32(name: &'n str) -> Self {
        Self::new(FieldKind::U32, name)
    }

    pub const fn bytes(name: &'n str, len: usize) -> Self {
        Self::new(FieldKind::Bytes(len), name)
    }

    /// Require the decoded integer to equal `value`
    pub const fn expect(self, value: i64, severity: Severity) -> Self {
        Self {
            check: Some(Check {
                expected: Expected::Int(value),
                severity,
            }),
            ..self
        }
    }

    /// Require the decoded byte string to equal `value`
    pub const fn expect_bytes(self, value: &'n [u8], severity: Severity) -> Self {
        Self {
            check: Some(Check {
                expected: Expected::Bytes(value),
                severity,
            }),
            ..self
        }
    }
}

/// Total width in bytes of the fields in `spec`
pub fn width(spec: &[Field<'_>]) -> usize {
    spec.iter()
        .fold(0usize, |acc, f| acc.saturating_add(f.kind.width()))
}

/// A decoded field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i64),
    Bytes(&'a [u8]),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) if *v < 0 => write!(f, "-{:#x}", v.unsigned_abs()),
            Value::Int(v) => write!(f, "{:#x}", v),
            Value::Bytes(b) => {
                f.write_str("x'")?;
                for byte in b.iter() {
                    write!(f, "{:02x}", byte)?;
                }
                f.write_str("'")
            },
        }
    }
}

/// Fields decoded from one record, in spec order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a, 'n> {
    consumed: usize,
    fields: SmallVec<[(&'n str, Value<'a>); 12]>,
}

impl<'a, 'n> Record<'a, 'n> {
    /// Number of bytes the record occupied
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Integer value of `name`
    pub fn int(&self, name: &str) -> Result<i64> {
        match self.get(name) {
            Some(Value::Int(v)) => Ok(v),
            Some(Value::Bytes(_)) => Err(SpecError::KindMismatch {
                field: name.to_string(),
                expected: "an integer",
            }
            .into()),
            None => Err(SpecError::MissingField(name.to_string()).into()),
        }
    }

    /// Byte string value of `name`, borrowed from the input
    pub fn bytes(&self, name: &str) -> Result<&'a [u8]> {
        match self.get(name) {
            Some(Value::Bytes(b)) => Ok(b),
            Some(Value::Int(_)) => Err(SpecError::KindMismatch {
                field: name.to_string(),
                expected: "a byte string",
            }
            .into()),
            None => Err(SpecError::MissingField(name.to_string()).into()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'n str, Value<'a>)> + '_ {
        self.fields.iter().copied()
    }
}

/// Decode the record described by `spec` from the front of `data`.
///
/// `context` names the record in any error raised.
///
/// # Errors
/// * [`Error::Truncated`] if `data` is shorter than the spec's width
/// * [`Error::BadData`] or [`Error::Unsupported`] when a check fails, according
///   to its [`Severity`]; fields after the failing one are not decoded
/// * [`Error::Spec`] if the spec declares a field name twice
pub fn decode<'a, 'n>(
    data: &'a [u8],
    spec: &[Field<'n>],
    context: &str,
) -> Result<Record<'a, 'n>> {
    let total = width(spec);
    let raw = data
        .get(..total)
        .ok_or_else(|| Error::truncated(context, total, data.len()))?;

    let mut fields: SmallVec<[(&'n str, Value<'a>); 12]> = SmallVec::with_capacity(spec.len());
    let mut offset = 0usize;
    for field in spec {
        if fields.iter().any(|(n, _)| *n == field.name) {
            return Err(SpecError::DuplicateField(field.name.to_string()).into());
        }
        let value = match field.kind {
            FieldKind::I16 => Value::Int(read_i16_le(raw, offset)?.into()),
            FieldKind::U16 => Value::Int(read_u16_le(raw, offset)?.into()),
            FieldKind::I32 => Value::Int(read_i32_le(raw, offset)?.into()),
            FieldKind::U32 => Value::Int(read_u32_le(raw, offset)?.into()),
            FieldKind::Bytes(len) => Value::Bytes(&raw[offset..offset + len]),
        };
        offset += field.kind.width();
        if let Some(check) = &field.check {
            check.verify(&value, field.name, context)?;
        }
        fields.push((field.name, value));
    }

    Ok(Record {
        consumed: total,
        fields,
    })
}
